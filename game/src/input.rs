use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Normalized name of the key that toggles pause.
pub const PAUSE_KEY: &str = "escape";

/// Restarts the session while the game is running.
pub const RESTART_KEY: &str = "r";

/// Key names are case-insensitive: "W" and "w" share one held-flag.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// Result of a key-down. `repeat` is set when the key was already held, which is how
/// OS auto-repeat shows up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub repeat: bool,
}

impl KeyPress {
    pub fn is_pause(&self) -> bool {
        self.key == PAUSE_KEY
    }

    pub fn is_restart(&self) -> bool {
        self.key == RESTART_KEY
    }
}

/// Held-flags by normalized key name. Entries are only ever flipped, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) -> KeyPress {
        let key = normalize_key(key);
        let repeat = self.held.insert(key.clone(), true).unwrap_or(false);
        KeyPress { key, repeat }
    }

    /// Releasing a key that was never pressed just records it as not held.
    pub fn release(&mut self, key: &str) {
        self.held.insert(normalize_key(key), false);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held
            .get(&normalize_key(key))
            .copied()
            .unwrap_or(false)
    }

    /// Currently held keys, sorted for stable output.
    pub fn held_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .held
            .iter()
            .filter(|(_, held)| **held)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}
