//! Key mapping from terminal events to game actions.
//!
//! Letters are matched case-insensitively. Keys chorded with Ctrl or Alt are
//! never game input, so Ctrl-C cannot double as a move.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key legend for the help screen: (keys, what they do).
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("← → A D H L", "MOVE"),
    ("↓ S J", "SOFT DROP"),
    ("SPACE", "HARD DROP"),
    ("↑ W K", "ROTATE CW"),
    ("Z Y", "ROTATE CCW"),
    ("ENTER", "START"),
    ("P ESC", "PAUSE"),
    ("R", "RESTART"),
    ("? F1", "HELP"),
    ("Q CTRL-C", "QUIT"),
];

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Up => GameAction::RotateCw,
        KeyCode::Enter => GameAction::Start,
        KeyCode::Esc => GameAction::Pause,
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char(c) => char_action(c.to_ascii_lowercase())?,
        _ => return None,
    };
    Some(action)
}

fn char_action(c: char) -> Option<GameAction> {
    match c {
        // WASD and vi keys mirror the arrows.
        'a' | 'h' => Some(GameAction::MoveLeft),
        'd' | 'l' => Some(GameAction::MoveRight),
        's' | 'j' => Some(GameAction::SoftDrop),
        'w' | 'k' => Some(GameAction::RotateCw),
        // `y` for QWERTZ layouts.
        'z' | 'y' => Some(GameAction::RotateCcw),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Whether the key toggles the help screen.
pub fn is_help_key(key: KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    matches!(key.code, KeyCode::Char('?') | KeyCode::F(1))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.eq_ignore_ascii_case(&'c')
        }
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
