//! High score persistence
//!
//! A single best score stored as a JSON number. Absent or corrupt values read
//! as 0; writes are best effort.

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Storage key
pub const STORAGE_KEY: &str = "space_defender_highscore";

/// Load the stored high score (0 if absent or unreadable)
pub fn load(store: &impl KeyValueStore) -> u64 {
    match load_json::<u64>(store, STORAGE_KEY) {
        Ok(Some(score)) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Ignoring stored high score: {}", e);
            0
        }
    }
}

/// Store `score` as the high score
pub fn save(store: &mut impl KeyValueStore, score: u64) {
    match save_json(store, STORAGE_KEY, &score) {
        Ok(()) => log::info!("High score saved ({})", score),
        Err(e) => log::warn!("Could not save high score: {}", e),
    }
}

/// Persist max(score, stored) and return it
pub fn record(store: &mut impl KeyValueStore, score: u64) -> u64 {
    let best = load(&*store).max(score);
    save(store, best);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(load(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_corrupt_is_zero() {
        assert_eq!(load(&MemoryStore::with_entry(STORAGE_KEY, "lots")), 0);
        assert_eq!(load(&MemoryStore::with_entry(STORAGE_KEY, "-5")), 0);
    }

    #[test]
    fn test_record_keeps_maximum() {
        let mut store = MemoryStore::new();
        assert_eq!(record(&mut store, 120), 120);
        assert_eq!(record(&mut store, 80), 120);
        assert_eq!(load(&store), 120);
        assert_eq!(store.raw(STORAGE_KEY), Some("120"));
    }

    /// Storage that refuses every operation
    struct Broken;

    impl KeyValueStore for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected {
                key: key.to_owned(),
            })
        }
    }

    #[test]
    fn test_broken_storage_is_not_fatal() {
        let mut store = Broken;
        assert_eq!(load(&store), 0);
        save(&mut store, 10);
        assert_eq!(record(&mut store, 30), 30);
    }
}
