//! Platform abstraction layer
//!
//! Input arrives from whatever windowing layer hosts the game. This module
//! owns the key bindings and turns raw key state into a `TickInput`.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    F,
    M,
    Escape,
}

/// Per-tick keyboard query
pub trait InputSource {
    /// Key is down right now
    fn is_held(&self, key: Key) -> bool;
    /// Key went down since the previous tick
    fn was_pressed(&self, key: Key) -> bool;
}

/// Keyboard state fed by key events, with edge tracking
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Auto-repeat is not a new press
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Clear one-shot presses after a tick has consumed them
    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Map keys to commands. Space starts, launches, fires and restarts
/// depending on the phase; F fires a spread shot; M toggles sound.
pub fn sample_input(source: &dyn InputSource) -> TickInput {
    TickInput {
        move_left: source.is_held(Key::Left) || source.is_held(Key::A),
        move_right: source.is_held(Key::Right) || source.is_held(Key::D),
        launch: source.was_pressed(Key::Space),
        fire_spread: source.was_pressed(Key::F),
        toggle_mute: source.was_pressed(Key::M),
        restart: source.was_pressed(Key::Space),
        autopilot: false,
    }
}

/// Quit request (whole-process cancellation)
pub fn quit_requested(source: &dyn InputSource) -> bool {
    source.was_pressed(Key::Escape)
}
