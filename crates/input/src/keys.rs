use blendview_camera::Movement;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::action::Action;

/// Errors from input mapping.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

/// Keys the demo binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::W => "W",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::Escape => "Escape",
        };
        f.write_str(name)
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" => Ok(Key::W),
            "a" => Ok(Key::A),
            "s" => Ok(Key::S),
            "d" => Ok(Key::D),
            "escape" | "esc" => Ok(Key::Escape),
            _ => Err(InputError::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Set of keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Resolve held keys into at most one movement command.
///
/// Diagonals win over cardinals, and among them the order is fixed:
/// S+D, S+A, W+D, W+A, then W, S, A, D. Opposing keys do not cancel;
/// the first matching row wins.
pub fn resolve_movement(keys: &KeyState) -> Option<Movement> {
    let (w, a, s, d) = (
        keys.is_held(Key::W),
        keys.is_held(Key::A),
        keys.is_held(Key::S),
        keys.is_held(Key::D),
    );

    if s && d {
        Some(Movement::BackwardRight)
    } else if s && a {
        Some(Movement::BackwardLeft)
    } else if w && d {
        Some(Movement::ForwardRight)
    } else if w && a {
        Some(Movement::ForwardLeft)
    } else if w {
        Some(Movement::Forward)
    } else if s {
        Some(Movement::Backward)
    } else if a {
        Some(Movement::Left)
    } else if d {
        Some(Movement::Right)
    } else {
        None
    }
}

/// Map keyboard state to this frame's actions: quit first, then movement.
pub fn map_keys(keys: &KeyState) -> Vec<Action> {
    let mut actions = Vec::new();
    if keys.is_held(Key::Escape) {
        actions.push(Action::Quit);
    }
    if let Some(movement) = resolve_movement(keys) {
        actions.push(Action::Move(movement));
    }
    actions
}
