//! Input handling

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

/// Result of handling one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key press, mutating app state as needed
pub fn handle_input(app: &mut App, key: KeyEvent, viewport_height: usize) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            Action::Quit
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            Action::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            Action::Continue
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            app.scroll_down(viewport_height);
            Action::Continue
        }
        KeyCode::PageUp => {
            app.scroll_up(viewport_height);
            Action::Continue
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.scroll_to_top();
            Action::Continue
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.scroll_to_bottom();
            Action::Continue
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            Action::Continue
        }
        KeyCode::Char('c') => {
            app.clear_cache();
            Action::Continue
        }
        KeyCode::Char('r') => {
            if let Err(e) = app.reload_document() {
                log::warn!("manual reload failed: {e:#}");
            }
            Action::Continue
        }
        _ => Action::Continue,
    }
}
