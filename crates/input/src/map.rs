//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Letter bindings, matched case-insensitively (vim keys and WASD side by side).
const LETTER_KEYS: [(char, GameAction); 11] = [
    ('h', GameAction::MoveLeft),
    ('a', GameAction::MoveLeft),
    ('l', GameAction::MoveRight),
    ('d', GameAction::MoveRight),
    ('k', GameAction::RotateCw),
    ('w', GameAction::RotateCw),
    ('x', GameAction::RotateCw),
    ('z', GameAction::RotateCcw),
    ('y', GameAction::RotateCcw),
    ('j', GameAction::Tick),
    ('s', GameAction::Tick),
];

/// Map a key press to a game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Tick),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => letter_action(c),
        _ => None,
    }
}

fn letter_action(c: char) -> Option<GameAction> {
    let c = c.to_ascii_lowercase();
    LETTER_KEYS
        .iter()
        .find(|(key, _)| *key == c)
        .map(|&(_, action)| action)
}

pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

/// `q`, Esc, or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Up), Some(GameAction::RotateCw));
        assert_eq!(press(KeyCode::Down), Some(GameAction::Tick));
    }

    #[test]
    fn test_letters_ignore_case() {
        for (c, action) in LETTER_KEYS {
            assert_eq!(press(KeyCode::Char(c)), Some(action), "{c}");
            assert_eq!(press(KeyCode::Char(c.to_ascii_uppercase())), Some(action), "{c}");
        }
        assert_eq!(press(KeyCode::Char('p')), None);
        assert_eq!(press(KeyCode::Char('r')), None);
    }

    #[test]
    fn test_space_and_enter_tick() {
        assert_eq!(press(KeyCode::Char(' ')), Some(GameAction::Tick));
        assert_eq!(press(KeyCode::Enter), Some(GameAction::Tick));
    }

    #[test]
    fn test_control_letters_are_not_actions() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));

        assert!(should_restart(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!should_restart(KeyEvent::from(KeyCode::Char('q'))));
    }
}
