//! Persisted, size-bounded history of generations.

use std::sync::Arc;

use super::model::HistoryItem;
use super::storage::KeyValueStore;

/// Storage key under which the full history sequence is kept.
pub const HISTORY_STORAGE_KEY: &str = "promptforge_history_v5_prod";

/// Upper bound on the number of retained items.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Ordered history, newest first, holding at most [`MAX_HISTORY_ITEMS`].
///
/// Every mutation rewrites the whole sequence to the backing store before it
/// returns. Storage failures are logged and absorbed: the in-memory sequence
/// stays authoritative for the rest of the session and no operation reports
/// an error to the caller.
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    /// Opens the history stored under [`HISTORY_STORAGE_KEY`].
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(storage, HISTORY_STORAGE_KEY)
    }

    /// Opens the history stored under a custom key.
    pub fn open_with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            items: Vec::new(),
        };
        store.items = store.load_all();
        tracing::debug!(key = %store.key, len = store.items.len(), "History loaded");
        store
    }

    /// Reads the persisted sequence.
    ///
    /// Absent, unreadable or corrupt storage yields an empty sequence.
    /// Entries that fail validation and repeats of an earlier id are dropped,
    /// and the result is cut to the newest [`MAX_HISTORY_ITEMS`] entries.
    pub fn load_all(&self) -> Vec<HistoryItem> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key = %self.key, "Failed to read history: {}", e);
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, "Discarding corrupt history: {}", e);
                return Vec::new();
            }
        };

        let mut items: Vec<HistoryItem> = Vec::with_capacity(entries.len().min(MAX_HISTORY_ITEMS));
        for entry in entries {
            if items.len() == MAX_HISTORY_ITEMS {
                break;
            }
            match serde_json::from_value::<HistoryItem>(entry) {
                Ok(item) if items.iter().any(|kept| kept.id() == item.id()) => {
                    tracing::warn!(item_id = %item.id(), "Dropping stored history item with duplicate id");
                }
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(key = %self.key, "Dropping invalid stored history item: {}", e);
                }
            }
        }
        items
    }

    /// Inserts an item at the front, evicting the oldest beyond the bound.
    ///
    /// An item whose id is already present replaces the older entry, and the
    /// timestamp is raised to the current newest one if it would otherwise
    /// go backwards.
    pub fn append(&mut self, mut item: HistoryItem) {
        if let Some(pos) = self.items.iter().position(|i| i.id() == item.id()) {
            tracing::warn!(item_id = %item.id(), "Replacing history item with duplicate id");
            self.items.remove(pos);
        }

        if let Some(newest) = self.items.first() {
            item.clamp_timestamp(newest.timestamp());
        }

        self.items.insert(0, item);
        if self.items.len() > MAX_HISTORY_ITEMS {
            let evicted = self.items.len() - MAX_HISTORY_ITEMS;
            self.items.truncate(MAX_HISTORY_ITEMS);
            tracing::debug!(evicted, "Evicted oldest history items");
        }
        self.persist();
    }

    /// Removes the item with the given id. Unknown ids are a no-op.
    ///
    /// Returns whether an item was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(item_id = %id, "History item removed");
        }
        self.persist();
        removed
    }

    /// Empties the history and erases its persisted form.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!(key = %self.key, "Failed to erase history: {}", e);
        }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.items) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(key = %self.key, "Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &serialized) {
            tracing::error!(key = %self.key, "Failed to persist history: {}", e);
        }
    }
}
