//! Held-key input

use std::collections::HashMap;

/// Anything the simulation can poll for held keys
pub trait InputSource {
    /// Whether `key` is currently held. Unknown keys read as not held.
    fn is_held(&self, key: &str) -> bool;
}

/// Key state fed by keydown/keyup events
///
/// Only keys that were registered with `register` are tracked; events for
/// any other key are ignored. Key names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    keys: HashMap<String, bool>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `key` (no-op if it is already tracked)
    pub fn register(&mut self, key: &str) {
        self.keys.entry(key.to_lowercase()).or_insert(false);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.keys.contains_key(&key.to_lowercase())
    }

    /// Record a key event. Returns false if the key isn't tracked.
    pub fn set_pressed(&mut self, key: &str, pressed: bool) -> bool {
        match self.keys.get_mut(&key.to_lowercase()) {
            Some(state) => {
                *state = pressed;
                true
            }
            None => false,
        }
    }

    /// Release every tracked key (e.g. on window blur)
    pub fn release_all(&mut self) {
        for state in self.keys.values_mut() {
            *state = false;
        }
    }
}

impl InputSource for KeyboardInput {
    fn is_held(&self, key: &str) -> bool {
        self.keys
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_keys_track_events() {
        let mut input = KeyboardInput::new();
        input.register("A");
        assert!(!input.is_held("a"));

        assert!(input.set_pressed("a", true));
        assert!(input.is_held("A"));

        input.set_pressed("A", false);
        assert!(!input.is_held("a"));
    }

    #[test]
    fn test_unregistered_keys_ignored() {
        let mut input = KeyboardInput::new();
        assert!(!input.set_pressed("q", true));
        assert!(!input.is_held("q"));
        assert!(!input.is_registered("q"));
    }

    #[test]
    fn test_release_all() {
        let mut input = KeyboardInput::new();
        input.register("a");
        input.register("d");
        input.set_pressed("a", true);
        input.set_pressed("d", true);
        input.release_all();
        assert!(!input.is_held("a"));
        assert!(!input.is_held("d"));
    }
}
