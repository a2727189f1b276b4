//! Keyboard state tracking
//!
//! Browser key events arrive between frames; the simulation only sees the
//! held state sampled once per tick.

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// Which bound keys are currently held
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    bindings: KeyBindings,
    left: bool,
    right: bool,
    fire: bool,
}

impl KeyState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Record a key press. Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Record a key release. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        if key == self.bindings.left {
            self.left = held;
        } else if key == self.bindings.right {
            self.right = held;
        } else if key == self.bindings.fire {
            self.fire = held;
        } else {
            return false;
        }
        true
    }

    /// Drop all held keys (focus loss)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.fire = false;
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
        }
    }
}
