//! Key/value persistence
//!
//! Values are JSON strings under fixed keys. The browser build stores them in
//! LocalStorage; native builds and tests use an in-memory map. Every caller
//! treats a failure as "use the default" and logs it.

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a storage operation failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected write to `{key}`")]
    Rejected { key: String },
    #[error("stored value is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON value (Ok(None) if the key is absent)
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// In-memory storage (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one raw value
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }

    /// Raw stored string, for inspection
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_through_memory() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "k", &vec![1u32, 2, 3]).expect("save");
        assert_eq!(store.raw("k"), Some("[1,2,3]"));
        let loaded: Option<Vec<u32>> = load_json(&store, "k").expect("load");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<u64> = load_json(&store, "absent").expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_malformed_value_is_error() {
        let store = MemoryStore::with_entry("k", "{oops");
        let err = load_json::<u64>(&store, "k").unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
