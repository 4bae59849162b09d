//! Storage layer for atomic file operations.

mod atomic_file;
mod file_kv_store;
mod secret_storage;

pub use atomic_file::{AtomicFile, AtomicFileError, AtomicTomlFile};
pub use file_kv_store::FileKeyValueStore;
pub use secret_storage::{SecretStorage, SecretStorageError};
