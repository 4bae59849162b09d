//! Directory-backed key-value store.

use std::path::{Path, PathBuf};

use promptforge_core::error::PersistenceError;
use promptforge_core::history::KeyValueStore;

use super::atomic_file::{AtomicFile, AtomicFileError};

/// Stores each key as `<dir>/<key>.json`, replaced atomically on every write.
///
/// ```text
/// ~/.config/promptforge/history/
/// └── promptforge_history_v5_prod.json
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile, PersistenceError> {
        validate_key(key)?;
        Ok(AtomicFile::new(self.dir.join(format!("{key}.json"))))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(PersistenceError::Unavailable(format!(
            "Invalid storage key: {key:?}"
        )))
    }
}

impl From<AtomicFileError> for PersistenceError {
    fn from(err: AtomicFileError) -> Self {
        match err {
            AtomicFileError::IoError(e) => e.into(),
            AtomicFileError::LockError(msg) => PersistenceError::Lock(msg),
            AtomicFileError::TomlError(e) => PersistenceError::Serialization {
                format: "TOML".to_string(),
                message: e.to_string(),
            },
            AtomicFileError::TomlSerError(e) => PersistenceError::Serialization {
                format: "TOML".to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.file_for(key)?.read()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.file_for(key)?.write(value)?;
        tracing::trace!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        Ok(self.file_for(key)?.remove()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptforge_core::history::{HistoryItem, HistoryStore};
    use promptforge_core::request::RequestBuilder;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("history"));

        assert_eq!(store.get("key").unwrap(), None);
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
        assert!(temp_dir.path().join("history").join("key.json").exists());

        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
        store.remove("key").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, "x"), Err(PersistenceError::Unavailable(_))),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn test_history_survives_a_new_session() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("history");

        let request = RequestBuilder::new("build a chatbot").build().unwrap();
        let item = HistoryItem::new(request, "Role: helper");
        {
            let mut store = HistoryStore::open(Arc::new(FileKeyValueStore::new(&dir)));
            store.append(item.clone());
        }

        let reopened = HistoryStore::open(Arc::new(FileKeyValueStore::new(&dir)));
        assert_eq!(reopened.items(), &[item]);
    }

    #[test]
    fn test_corrupt_file_yields_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("history");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{}.json", promptforge_core::history::HISTORY_STORAGE_KEY)),
            "not json at all",
        )
        .unwrap();

        let store = HistoryStore::open(Arc::new(FileKeyValueStore::new(&dir)));
        assert!(store.is_empty());
    }
}
