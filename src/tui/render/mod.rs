pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::nav::NavState;
use crate::tui::app::App;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (blank row + title row) | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    list_view::render_list_view(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Title row: the list title, plus overall progress at the root
fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!("  {}", app.nav.title()),
        Style::default()
            .fg(app.theme.title)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    if app.show_progress && *app.nav.state() == NavState::Root {
        let progress = app.nav.index().total_progress();
        spans.push(Span::styled(
            format!("  {}/{}", progress.done, progress.total),
            Style::default().fg(app.theme.hint).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
