//! Keyboard input tracking
//!
//! Key events write here as they arrive; the simulation only ever sees a
//! by-value `TickInput` taken once per tick.

use crate::sim::TickInput;

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    StartGame,
    ToggleMute,
    ToggleDarkMode,
}

impl InputAction {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Self::MoveRight),
            " " | "Spacebar" | "ArrowUp" | "w" | "W" => Some(Self::Fire),
            "Enter" => Some(Self::StartGame),
            "m" | "M" => Some(Self::ToggleMute),
            "t" | "T" => Some(Self::ToggleDarkMode),
            _ => None,
        }
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Current key state
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    /// Physical keys currently down (lowercased), with the held action each drives
    held: Vec<(String, InputAction)>,
    /// A fire press not yet consumed by a snapshot
    fire_pending: bool,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns the action it maps to (None if unbound)
    ///
    /// `repeat` is the browser's auto-repeat flag. Repeats never count as a
    /// new fire press.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<InputAction> {
        let action = InputAction::from_key(key)?;
        if !matches!(
            action,
            InputAction::MoveLeft | InputAction::MoveRight | InputAction::Fire
        ) {
            return Some(action);
        }

        // A fresh fire press needs every fire key released first
        if action == InputAction::Fire && !repeat && !self.action_held(InputAction::Fire) {
            self.fire_pending = true;
        }

        let key = key.to_ascii_lowercase();
        if !self.held.iter().any(|(k, _)| *k == key) {
            self.held.push((key, action));
        }
        Some(action)
    }

    /// Record a key release
    pub fn key_up(&mut self, key: &str) {
        let key = key.to_ascii_lowercase();
        self.held.retain(|(k, _)| *k != key);
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.action_held(InputAction::MoveLeft),
            Direction::Right => self.action_held(InputAction::MoveRight),
        }
    }

    fn action_held(&self, action: InputAction) -> bool {
        self.held.iter().any(|(_, a)| *a == action)
    }

    /// True once per physical fire press
    pub fn fire_requested(&mut self) -> bool {
        std::mem::take(&mut self.fire_pending)
    }

    /// Drop a fire press that has not been consumed yet
    pub fn discard_fire(&mut self) {
        self.fire_pending = false;
    }

    /// Forget every held key (focus loss, teardown)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Input for the next tick (consumes a pending fire press)
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
            fire: self.fire_requested(),
        }
    }
}
