//! Input handling - convert key events to viewer actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the viewer can do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Generate the next seed
    NextSeed,
    /// Generate the previous seed
    PrevSeed,
    /// Generate the current seed again
    Regenerate,
    /// Switch between the town and the geometry sketch
    ToggleSketch,
    /// Switch between palettes
    TogglePalette,
    Quit,
}

/// Convert a key event to a viewer action
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char(' ') => Some(Action::NextSeed),
        KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevSeed),
        KeyCode::Char('r') => Some(Action::Regenerate),
        KeyCode::Char('s') => Some(Action::ToggleSketch),
        KeyCode::Char('c') => Some(Action::TogglePalette),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
