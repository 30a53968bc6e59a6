//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Space doubles as a downward move while playing; see [`is_restart_key`]
/// for its game-over meaning.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::MoveDown,
        KeyCode::Up => GameAction::Rotate,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => GameAction::MoveLeft,
            'l' | 'd' => GameAction::MoveRight,
            'j' | 's' | ' ' => GameAction::MoveDown,
            'k' | 'w' => GameAction::Rotate,
            'r' => GameAction::Restart,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Keys that start a new game once the current one is over.
pub fn is_restart_key(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
    )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(GameAction::MoveDown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::MoveDown)
        );
    }

    #[test]
    fn test_rotation_keys() {
        for code in [KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('W')] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(GameAction::Rotate));
        }
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_restart_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert!(is_restart_key(KeyEvent::from(KeyCode::Char(' '))));
        assert!(is_restart_key(KeyEvent::from(KeyCode::Enter)));
        assert!(!is_restart_key(KeyEvent::from(KeyCode::Down)));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
