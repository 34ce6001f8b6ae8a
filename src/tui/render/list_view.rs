use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::{NavState, Row};
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the current list (categories or items), one page at a time
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = (area.height as usize).max(1);
    app.page_size = height;
    app.clamp_cursor();
    app.scroll_offset = (app.cursor / height) * height;

    let bg = app.theme.background;
    let width = app.nav.width().min(area.width) as usize;
    let rows = app.nav.rows();

    let mut lines: Vec<Line> = Vec::new();
    if rows.is_empty() {
        let message = match app.nav.state() {
            NavState::Root => "    No entries",
            NavState::InCategory(_) => "    Nothing here (backspace to go back)",
        };
        lines.push(Line::from(Span::styled(
            truncate_to_width(message, width),
            Style::default().fg(app.theme.hint).bg(bg),
        )));
    }

    for (i, row) in rows.iter().enumerate().skip(app.scroll_offset).take(height) {
        lines.push(render_row(app, row, i, i == app.cursor, width));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_row(
    app: &App,
    row: &Row,
    index: usize,
    is_cursor: bool,
    width: usize,
) -> Line<'static> {
    let bg = app.theme.background;
    let prefix = if is_cursor { "  > " } else { "    " };
    let number = format!("{}. ", index + 1);

    let (suffix, complete) = match row {
        Row::Category { progress, .. } => {
            let suffix = if app.show_progress {
                format!("  {}/{}", progress.done, progress.total)
            } else {
                String::new()
            };
            (suffix, progress.is_complete())
        }
        Row::Item(label) => (String::new(), label.done),
    };

    let fg: Color = if is_cursor {
        app.theme.highlight
    } else if complete {
        app.theme.complete
    } else {
        app.theme.text
    };
    let mut text_style = Style::default().fg(fg).bg(bg);
    if is_cursor {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let used = display_width(prefix) + display_width(&number);
    let available = width.saturating_sub(used + display_width(&suffix));
    let text = truncate_to_width(row.text(), available);

    let mut spans = vec![
        Span::styled(prefix, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(number, Style::default().fg(fg).bg(bg)),
        Span::styled(text, text_style),
    ];
    if !suffix.is_empty() {
        spans.push(Span::styled(suffix, Style::default().fg(app.theme.hint).bg(bg)));
    }
    Line::from(spans)
}
