//! Game settings and preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Player preferences handed to the audio and theme collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Silence all sound effects
    pub muted: bool,
    /// Dark color scheme
    pub dark_mode: bool,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "space_defender_settings";

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Load settings (defaults if absent or unreadable)
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings (best effort)
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_toggle_and_persist() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());

        settings.toggle_muted();
        settings.toggle_dark_mode();
        settings.save(&mut store);

        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, r#"{"dark_mode":true}"#);
        let settings = Settings::load(&store);
        assert!(settings.dark_mode);
        assert!(!settings.muted);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "[]");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
