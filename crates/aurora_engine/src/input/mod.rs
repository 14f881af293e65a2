//! Input state queried by entity behaviors
//!
//! Entities never poll devices. They ask an [`InputState`] whether a key is
//! held this tick, which keeps the simulation independent of the windowing
//! layer and lets tests script input.

use std::collections::HashSet;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Cast a spell
    Cast,
}

/// Read-only view of the keyboard for one tick
pub trait InputState {
    /// Whether `key` is held
    fn is_key_down(&self, key: Key) -> bool;
}

/// Input that never reports a key as held
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputState for NoInput {
    fn is_key_down(&self, _key: Key) -> bool {
        false
    }
}

/// Set of held keys
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    /// Create a keyboard with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Keys currently held
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

impl FromIterator<Key> for KeyboardState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

impl InputState for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
