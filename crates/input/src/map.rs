//! Key mapping from terminal events to actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to an action, `None` for unbound keys and releases.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit(key) {
        return Some(Action::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::MoveUp),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Action::RotateCcw),

        KeyCode::Char(' ') => Some(Action::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::SwapHoldPiece),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleSuper),

        // Scene
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Enter => Some(Action::MenuConfirm),

        _ => None,
    }
}

/// `q`, `Esc` or Ctrl-C.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
