use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::NavState;
use crate::tui::app::App;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

/// Render the status row (bottom of screen): a message or key hints on the
/// left, the page indicator on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (page, pages) = app.pagination();
    let page_str = if pages > 1 {
        format!("{}/{} ", page, pages)
    } else {
        String::new()
    };

    let (left, left_style) = match &app.status {
        Some(status) => {
            let color = if status.is_error {
                app.theme.error
            } else {
                app.theme.text
            };
            (format!(" {}", status.text), Style::default().fg(color).bg(bg))
        }
        None if app.show_key_hints => (
            key_hints(app.nav.state()).to_string(),
            Style::default().fg(app.theme.hint).bg(bg),
        ),
        None => (String::new(), Style::default().bg(bg)),
    };

    let left_width = width.saturating_sub(display_width(&page_str));
    let left = pad_to_width(&truncate_to_width(&left, left_width), left_width);

    let line = Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(page_str, Style::default().fg(app.theme.hint).bg(bg)),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(state: &NavState) -> &'static str {
    match state {
        NavState::Root => " enter open  \u{2191}\u{2193} move  ? help  q quit",
        NavState::InCategory(_) => " enter toggle  backspace back  ? help  q quit",
    }
}
