//! Keyboard bindings.
//!
//! Letters are matched case-insensitively; arrow keys, Space and Enter are
//! matched by key code. Any chord held with Ctrl maps to nothing so that
//! Ctrl-C stays reserved for the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Intent;

/// Letter bindings, stored lowercase.
const LETTERS: &[(char, Intent)] = &[
    ('h', Intent::MoveLeft),
    ('a', Intent::MoveLeft),
    ('l', Intent::MoveRight),
    ('d', Intent::MoveRight),
    ('j', Intent::SoftDrop),
    ('s', Intent::SoftDrop),
    ('k', Intent::Rotate),
    ('w', Intent::Rotate),
    ('p', Intent::ToggleStartPause),
    (' ', Intent::HardDrop),
];

fn letter_intent(ch: char) -> Option<Intent> {
    let ch = ch.to_ascii_lowercase();
    LETTERS
        .iter()
        .find_map(|&(bound, intent)| (bound == ch).then_some(intent))
}

/// Map keyboard input to an intent.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),
        KeyCode::Up => Some(Intent::Rotate),
        KeyCode::Enter => Some(Intent::ToggleStartPause),
        KeyCode::Char(ch) => letter_intent(ch),
        _ => None,
    }
}

/// `q` in any case, or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(ch) => ch.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
