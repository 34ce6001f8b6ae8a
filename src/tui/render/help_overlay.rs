use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::nav::NavState;
use crate::tui::app::App;
use crate::util::unicode::pad_to_width;

/// Keys column, description column. The first row's description depends on
/// the open view and is filled in at draw time.
const BINDINGS: &[(&str, &str)] = &[
    ("Enter \u{2192} l", ""),
    ("Bksp \u{2190} h Esc", "Back to categories"),
    ("\u{2191} \u{2193} j k", "Move highlight"),
    ("g G Home End", "Jump to top / bottom"),
    ("PgUp PgDn", "Previous / next page"),
    ("?", "Close this help"),
    ("q Ctrl+C", "Quit"),
];

const KEY_COLUMN: usize = 18;

/// Draw the key list in a bordered box centered over `area`
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);

    let select_desc = match app.nav.state() {
        NavState::Root => "Open category",
        NavState::InCategory(_) => "Toggle done",
    };

    let mut lines = vec![
        Line::from(Span::styled(
            " Key Bindings",
            Style::default()
                .fg(app.theme.title)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for &(keys, desc) in BINDINGS {
        let desc = if desc.is_empty() { select_desc } else { desc };
        lines.push(Line::from(vec![
            Span::styled(pad_to_width(&format!(" {}", keys), KEY_COLUMN), key_style),
            Span::styled(desc, desc_style),
        ]));
    }

    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let overlay = centered(content_width as u16 + 3, lines.len() as u16 + 2, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.hint).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
