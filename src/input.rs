//! Keyboard input latch
//!
//! Hosts deliver discrete key-down/key-up events. Movement keys are latched
//! into held flags; Confirm and Restart are one-shot commands handled by the
//! game state machine.

use crate::sim::TickInput;

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Start from the title screen (Enter)
    Confirm,
    /// Restart after game over (R)
    Restart,
}

/// A key transition from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
    /// OS auto-repeat; dropped before it reaches the latch
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            pressed: true,
            repeat: false,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            pressed: false,
            repeat: false,
        }
    }
}

/// Currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    move_left: bool,
    move_right: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a movement key transition. Callers gate on game phase.
    pub fn apply(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        match event.key {
            Key::Left => self.move_left = event.pressed,
            Key::Right => self.move_right = event.pressed,
            Key::Confirm | Key::Restart => {}
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
        }
    }
}
