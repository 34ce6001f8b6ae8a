use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::store::ItemStore;
use crate::model::Config;
use crate::nav::{Action, Navigator, Outcome};

use super::input;
use super::render;
use super::theme::Theme;

/// Printed after the terminal is restored when the user quits
pub const EXIT_MESSAGE: &str = "Exiting App... Goodbye!";

/// A message in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// Main application state: the navigator plus everything only the screen cares about
pub struct App {
    pub nav: Navigator,
    pub theme: Theme,
    pub show_progress: bool,
    pub show_key_hints: bool,
    /// Highlighted row of the current list
    pub cursor: usize,
    /// First row on screen
    pub scroll_offset: usize,
    /// Rows that fit in the list area, as of the last draw
    pub page_size: usize,
    /// Root highlight to restore when backing out of a category
    pub root_cursor: usize,
    pub show_help: bool,
    pub status: Option<Status>,
}

impl App {
    pub fn new(nav: Navigator, config: &Config) -> Self {
        App {
            nav,
            theme: Theme::from_config(&config.ui),
            show_progress: config.ui.show_progress,
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            page_size: 1,
            root_cursor: 0,
            show_help: false,
            status: None,
        }
    }

    /// Hand an action to the navigator and update screen state from the outcome
    pub fn dispatch(&mut self, action: Action) {
        match self.nav.apply(action) {
            Outcome::Entered { .. } => {
                self.root_cursor = self.cursor;
                self.cursor = 0;
                self.scroll_offset = 0;
                self.status = None;
            }
            Outcome::Returned { .. } => {
                self.cursor = self.root_cursor;
                self.status = None;
            }
            Outcome::Toggled { .. } => {
                // A successful save clears any earlier failure
                self.status = None;
            }
            Outcome::Unsaved { name, error, .. } => {
                self.status = Some(Status {
                    text: format!("{} not saved: {}", name, error),
                    is_error: true,
                });
            }
            Outcome::Quit | Outcome::Resized(_) | Outcome::Ignored => {}
        }
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.nav.len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.nav.len().saturating_sub(1);
    }

    /// Move a whole page up (negative) or down (positive)
    pub fn page(&mut self, pages: isize) {
        self.move_cursor(pages * self.page_size.max(1) as isize);
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.nav.len().saturating_sub(1));
    }

    pub fn should_quit(&self) -> bool {
        self.nav.is_quit()
    }

    /// The farewell line, once the user has quit
    pub fn exit_message(&self) -> Option<&'static str> {
        self.should_quit().then_some(EXIT_MESSAGE)
    }

    /// Current page (1-based) and page count of the list
    pub fn pagination(&self) -> (usize, usize) {
        let per_page = self.page_size.max(1);
        let pages = self.nav.len().div_ceil(per_page).max(1);
        (self.cursor / per_page + 1, pages)
    }
}

/// Run the TUI against the checklist in `data_dir` (default: current directory)
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config_io::resolve_data_dir(data_dir)?;
    let config = config_io::read_config(&data_dir)?;
    let mut store = ItemStore::from_config(&data_dir, &config);
    store.load()?;

    let nav = Navigator::new(store, &config.tracker.title, &config.ui.done_marker);
    let mut app = App::new(nav, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    if let Ok((width, _)) = terminal::size() {
        app.dispatch(Action::Resize(width));
    }

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if let Some(message) = app.exit_message() {
        println!("{}", message);
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
            Event::Resize(width, _) => app.dispatch(Action::Resize(width)),
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
