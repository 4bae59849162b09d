//! Durable key-value storage capability.
//!
//! The history store depends only on this interface, so the backing store can
//! be a directory of files, an embedded database, or memory in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::PersistenceError;

/// A string-valued store addressed by fixed keys.
///
/// Implementations must make `set` all-or-nothing: after a failed `set`
/// the previous value (or absence) remains readable.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes the key. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Process-local store, used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, PersistenceError> {
        self.entries
            .lock()
            .map_err(|e| PersistenceError::Lock(format!("In-memory store poisoned: {e}")))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Removing again is not an error
        store.remove("k").unwrap();
    }
}
