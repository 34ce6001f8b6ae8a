use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::Action;
use crate::tui::app::App;

/// Map a key to a navigator action, if it is one
pub fn key_action(app: &App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            Some(Action::Select(app.cursor))
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') | KeyCode::Esc => {
            Some(Action::Back)
        }
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if let Some(action) = key_action(app, key) {
        app.dispatch(action);
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => app.cursor_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.cursor_to_bottom(),
        KeyCode::PageUp => app.page(-1),
        KeyCode::PageDown => app.page(1),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChecklistEntry;
    use crate::tui::render::test_helpers::app_with_entries;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (tempfile::TempDir, App) {
        app_with_entries(&[
            ChecklistEntry::new("XM4", "Assault Rifles"),
            ChecklistEntry::new("C9", "SMGs"),
            ChecklistEntry::new("GS45", "Pistols"),
        ])
    }

    #[test]
    fn select_keys_use_cursor() {
        let (_dir, mut app) = app();
        app.cursor = 1;
        for code in [
            KeyCode::Enter,
            KeyCode::Right,
            KeyCode::Char('l'),
            KeyCode::Char(' '),
        ] {
            assert_eq!(key_action(&app, key(code)), Some(Action::Select(1)));
        }
    }

    #[test]
    fn back_and_quit_keys() {
        let (_dir, app) = app();
        for code in [
            KeyCode::Backspace,
            KeyCode::Left,
            KeyCode::Char('h'),
            KeyCode::Esc,
        ] {
            assert_eq!(key_action(&app, key(code)), Some(Action::Back));
        }
        assert_eq!(key_action(&app, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            key_action(
                &app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
        assert_eq!(
            key_action(
                &app,
                KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)
            ),
            None
        );
    }

    #[test]
    fn movement_keys_move_highlight() {
        let (_dir, mut app) = app();
        handle_navigate(&mut app, key(KeyCode::Char('j')));
        handle_navigate(&mut app, key(KeyCode::Down));
        assert_eq!(app.cursor, 2);
        handle_navigate(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, 1);
        handle_navigate(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.cursor, 2);
        handle_navigate(&mut app, key(KeyCode::Home));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn ctrl_c_quits() {
        let (_dir, mut app) = app();
        handle_navigate(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }
}
