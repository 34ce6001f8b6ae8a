use std::fs;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store::{ItemStore, Seed, serialize_entries};
use crate::model::{ChecklistEntry, Config};
use crate::nav::{Action, Navigator};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over a temp state file holding `entries`, sized to TERM_W.
/// Keep the TempDir alive for as long as the App is used.
pub fn app_with_entries(entries: &[ChecklistEntry]) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("camos.json"), serialize_entries(entries)).unwrap();

    let config = Config::default();
    let mut store = ItemStore::new(dir.path(), "camos.json", Seed::Text("[]".into()));
    store.load().unwrap();
    let nav = Navigator::new(store, &config.tracker.title, &config.ui.done_marker);

    let mut app = App::new(nav, &config);
    app.dispatch(Action::Resize(TERM_W));
    (dir, app)
}
