//! # Input State
//!
//! The per-tick input snapshot the player consumes, and the manager that derives it
//! from the host's raw key events.
//!
//! The host forwards key presses and releases to an [`InputManager`] as they arrive.
//! Once per tick it calls [`InputManager::process`] to get an [`InputBundle`], in which
//! every key carries a [`KeyState`] describing its transition since the previous tick.

use std::collections::HashMap;

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move forward
    W,
    /// Move backward
    S,
    /// Strafe left
    A,
    /// Strafe right
    D,
    /// Fly down
    Q,
    /// Fly up
    E,
    /// Jump
    Space,
    /// Toggle flight mode
    F,
    /// Look left
    Left,
    /// Look right
    Right,
    /// Look up
    Up,
    /// Look down
    Down,
}

impl Key {
    /// Every key the engine tracks.
    pub const ALL: [Key; 12] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::Q,
        Key::E,
        Key::Space,
        Key::F,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
    ];
}

/// Represents the state of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    /// Key is not pressed
    #[default]
    NotPressed,
    /// Key was just pressed this tick
    Pressed,
    /// Key has been held down for multiple ticks
    Held,
    /// Key was just released this tick
    Released,
}

impl KeyState {
    /// Determines if the key is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, KeyState::Pressed | KeyState::Held)
    }

    /// Determines if the key was just pressed this tick
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, KeyState::Pressed)
    }

    /// Determines if the key was just released this tick
    pub fn is_just_released(&self) -> bool {
        matches!(self, KeyState::Released)
    }

    /// Derives the state from whether the key was down last tick and is down now
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => KeyState::Pressed,
            (true, true) => KeyState::Held,
            (true, false) => KeyState::Released,
            (false, false) => KeyState::NotPressed,
        }
    }
}

/// A snapshot of every tracked key's state for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBundle {
    key_states: HashMap<Key, KeyState>,
}

impl InputBundle {
    /// Creates a bundle with every key not pressed.
    pub fn new() -> Self {
        InputBundle::default()
    }

    /// Returns a copy of this bundle with `key` in `state`.
    pub fn with_key(mut self, key: Key, state: KeyState) -> Self {
        self.key_states.insert(key, state);
        self
    }

    /// Gets the state of a key
    pub fn get_key_state(&self, key: Key) -> KeyState {
        self.key_states.get(&key).copied().unwrap_or_default()
    }

    /// Whether a key is down this tick
    pub fn is_held(&self, key: Key) -> bool {
        self.get_key_state(key).is_active()
    }
}

/// Turns raw key events into per-tick [`InputBundle`]s.
#[derive(Debug, Clone)]
pub struct InputManager {
    /// Key states as of the previous tick
    keyboard_inputs_old: HashMap<Key, bool>,
    /// Key states as of the latest event
    keyboard_inputs_new: HashMap<Key, bool>,
}

impl Default for InputManager {
    fn default() -> Self {
        InputManager::new()
    }
}

impl InputManager {
    /// Creates a manager with every key released.
    pub fn new() -> Self {
        let released: HashMap<Key, bool> = Key::ALL.iter().map(|&key| (key, false)).collect();
        InputManager {
            keyboard_inputs_old: released.clone(),
            keyboard_inputs_new: released,
        }
    }

    /// Records a key press or release from the host.
    pub fn intake_key(&mut self, key: Key, pressed: bool) {
        self.keyboard_inputs_new.insert(key, pressed);
    }

    /// Produces this tick's snapshot and starts tracking the next tick.
    pub fn process(&mut self) -> InputBundle {
        let mut bundle = InputBundle::new();
        for key in Key::ALL {
            let previous = self.keyboard_inputs_old.get(&key).copied().unwrap_or(false);
            let current = self.keyboard_inputs_new.get(&key).copied().unwrap_or(false);
            bundle = bundle.with_key(key, KeyState::from_raw_states(previous, current));
        }
        self.keyboard_inputs_old = self.keyboard_inputs_new.clone();
        bundle
    }
}
