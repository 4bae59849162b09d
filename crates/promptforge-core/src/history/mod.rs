//! Generation history: the persisted, size-bounded record of past requests
//! and their results.

pub mod model;
pub mod storage;
pub mod store;

pub use model::HistoryItem;
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
pub use store::{HISTORY_STORAGE_KEY, HistoryStore, MAX_HISTORY_ITEMS};
