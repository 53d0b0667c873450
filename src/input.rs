//! Input dispatcher: one key press, at most one score check.
//!
//! Held keys that the terminal auto-repeats arrive as `Repeat` events and
//! are dispatched like fresh presses.  Releases are not presses and are
//! ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;
use crate::scoring::ScoreResult;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Hit(Direction),
    TogglePause,
    Quit,
}

/// What a key event turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Scored(ScoreResult),
    TogglePause,
    Quit,
    Ignored,
}

pub fn action_for(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Hit(Direction::Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Hit(Direction::Down),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Hit(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Hit(Direction::Right)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
        _ => return None,
    };
    Some(action)
}

/// Route one key event.  Directional keys score against `session`;
/// everything else is reported back for the loop to act on.
pub fn dispatch(key: &KeyEvent, session: &mut Session) -> Dispatch {
    match action_for(key) {
        Some(KeyAction::Hit(direction)) => Dispatch::Scored(session.press(direction)),
        Some(KeyAction::TogglePause) => Dispatch::TogglePause,
        Some(KeyAction::Quit) => Dispatch::Quit,
        None => Dispatch::Ignored,
    }
}
