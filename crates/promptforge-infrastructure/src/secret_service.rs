//! Secret service implementation.
//!
//! Credentials come from the `GEMINI_API_KEY` environment variable first and
//! from secret.json second.

use crate::paths::ForgePaths;
use crate::storage::{SecretStorage, SecretStorageError};
use promptforge_core::config::{GeminiConfig, SecretConfig};
use promptforge_core::error::ForgeError;
use promptforge_core::secret::SecretService;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable that overrides the key in secret.json.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for loading secret configuration.
///
/// A configuration holding an API key is cached after the first read. Until
/// then the file is re-read on every call, so a key added to secret.json
/// while the process runs is picked up. A missing file is treated as an empty
/// configuration so the caller can report a missing credential itself.
#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: SecretStorage,
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service for the secret file resolved by `paths`, capturing
    /// the environment override at construction time.
    pub fn new(paths: &ForgePaths) -> Result<Self, ForgeError> {
        let path = paths
            .secret_file()
            .map_err(|e| ForgeError::config(format!("Failed to get secret path: {}", e)))?;
        Ok(Self::with_path(path, std::env::var(GEMINI_API_KEY_ENV).ok()))
    }

    /// Creates a service with an explicit file and environment override.
    pub fn with_path(path: PathBuf, env_api_key: Option<String>) -> Self {
        Self {
            storage: SecretStorage::new(path),
            env_api_key: env_api_key.filter(|key| !key.trim().is_empty()),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn storage(&self) -> &SecretStorage {
        &self.storage
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        if let Ok(cached) = self.secrets.read() {
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = match self.storage.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!("No secret file at {}", path.display());
                SecretConfig::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load secret.json: {}", e);
                return Err(format!("Failed to load secret.json: {}", e));
            }
        };

        if let Some(key) = &self.env_api_key {
            let model_name = loaded.gemini.as_ref().and_then(|g| g.model_name.clone());
            loaded.gemini = Some(GeminiConfig {
                api_key: key.trim().to_string(),
                model_name,
            });
        }

        if loaded.gemini_api_key().is_some() {
            if let Ok(mut cache) = self.secrets.write() {
                *cache = Some(loaded.clone());
            }
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_no_key() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::with_path(temp_dir.path().join("secret.json"), None);

        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), None);
        assert!(!service.secret_file_exists().await);
    }

    #[tokio::test]
    async fn test_env_key_overrides_file_and_keeps_model() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(
            &path,
            r#"{"gemini": {"api_key": "file-key", "model_name": "gemini-pro"}}"#,
        )
        .unwrap();

        let service = SecretServiceImpl::with_path(path, Some("env-key".to_string()));
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("env-key"));
        assert_eq!(secrets.gemini_model(), Some("gemini-pro"));
    }

    #[tokio::test]
    async fn test_blank_env_key_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"gemini": {"api_key": "file-key"}}"#).unwrap();

        let service = SecretServiceImpl::with_path(path, Some("  ".to_string()));
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("file-key"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{ nope").unwrap();

        let service = SecretServiceImpl::with_path(path, None);
        assert!(service.load_secrets().await.is_err());
    }

    #[tokio::test]
    async fn test_key_added_later_is_picked_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        let service = SecretServiceImpl::with_path(path.clone(), None);

        assert_eq!(service.load_secrets().await.unwrap().gemini_api_key(), None);

        fs::write(&path, r#"{"gemini": {"api_key": "late-key"}}"#).unwrap();
        assert_eq!(
            service.load_secrets().await.unwrap().gemini_api_key(),
            Some("late-key")
        );
    }

    #[tokio::test]
    async fn test_loaded_key_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"gemini": {"api_key": "first"}}"#).unwrap();
        let service = SecretServiceImpl::with_path(path.clone(), None);
        service.load_secrets().await.unwrap();

        fs::write(&path, r#"{"gemini": {"api_key": "second"}}"#).unwrap();
        assert_eq!(
            service.load_secrets().await.unwrap().gemini_api_key(),
            Some("first")
        );
    }
}
