//! Composition root: wires configuration, storage and the generator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use promptforge_application::GenerationController;
use promptforge_core::history::{HistoryStore, InMemoryKeyValueStore, KeyValueStore};
use promptforge_core::secret::SecretService;
use promptforge_infrastructure::{ConfigService, FileKeyValueStore, ForgePaths, SecretServiceImpl};
use promptforge_interaction::GenerationClient;

/// Everything a command needs.
pub struct AppContext {
    pub paths: ForgePaths,
    pub controller: GenerationController,
}

/// Storage options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
    pub data_dir: Option<PathBuf>,
    /// Keep history in memory only for this run.
    pub ephemeral: bool,
}

impl StorageOptions {
    pub fn paths(&self) -> ForgePaths {
        ForgePaths::new(self.data_dir.as_deref())
    }
}

pub fn bootstrap(options: &StorageOptions) -> Result<AppContext> {
    let paths = options.paths();

    let config = ConfigService::new(&paths)?
        .load()
        .context("Failed to load config.toml")?;
    let secrets: Arc<dyn SecretService> = Arc::new(SecretServiceImpl::new(&paths)?);
    let client = GenerationClient::from_settings(&config.generation, secrets)
        .context("Failed to initialize the Gemini client")?;

    let storage: Arc<dyn KeyValueStore> = if options.ephemeral {
        tracing::debug!("Using in-memory history");
        Arc::new(InMemoryKeyValueStore::new())
    } else {
        let dir = paths.history_dir()?;
        tracing::debug!("Using history at {}", dir.display());
        Arc::new(FileKeyValueStore::new(dir))
    };
    let history = HistoryStore::open(storage);

    Ok(AppContext {
        paths,
        controller: GenerationController::new(Arc::new(client), history),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bootstrap_with_fresh_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let options = StorageOptions {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ephemeral: false,
        };

        let ctx = bootstrap(&options).unwrap();
        assert!(ctx.controller.history().await.is_empty());
        assert_eq!(ctx.paths.config_dir().unwrap(), temp_dir.path());
    }

    #[test]
    fn test_bootstrap_rejects_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "[generation").unwrap();
        let options = StorageOptions {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ephemeral: true,
        };

        assert!(bootstrap(&options).is_err());
    }
}
