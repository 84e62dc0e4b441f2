//! Keyboard intent
//!
//! The platform layer forwards raw key down/up events here. The simulation
//! only ever sees the resulting `TickInput`.

use crate::sim::{HeldDirections, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Space" | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Current intent: held directions plus a queued shot
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldDirections,
    fire_down: bool,
    fire_queued: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.held.left = true,
            Key::Right => self.held.right = true,
            Key::Up => self.held.up = true,
            Key::Down => self.held.down = true,
            Key::Fire => self.fire_down = true,
        }
    }

    /// Releasing fire after pressing it queues exactly one shot
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.held.left = false,
            Key::Right => self.held.right = false,
            Key::Up => self.held.up = false,
            Key::Down => self.held.down = false,
            Key::Fire => {
                if self.fire_down {
                    self.fire_queued = true;
                }
                self.fire_down = false;
            }
        }
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    pub fn fire_queued(&self) -> bool {
        self.fire_queued
    }

    /// Drop a queued shot without firing it
    pub fn cancel_fire(&mut self) {
        self.fire_queued = false;
    }

    /// Build the input for the next tick, consuming any queued shot
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            held: self.held,
            fire: std::mem::take(&mut self.fire_queued),
        }
    }
}
