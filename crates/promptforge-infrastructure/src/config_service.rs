//! Application configuration (config.toml).

use crate::paths::ForgePaths;
use crate::storage::{AtomicFileError, AtomicTomlFile};
use promptforge_core::config::AppConfig;
use promptforge_core::error::{ForgeError, Result};

/// Loads and saves `config.toml`.
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: &ForgePaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| ForgeError::config(format!("Failed to get config path: {}", e)))?;
        Ok(Self {
            file: AtomicTomlFile::new(path),
        })
    }

    /// Loads the configuration. A missing or empty file yields the defaults;
    /// a malformed file is an error.
    pub fn load(&self) -> Result<AppConfig> {
        match self.file.load() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                tracing::debug!("No config.toml at {}, using defaults", self.file.path().display());
                Ok(AppConfig::default())
            }
            Err(e) => Err(to_forge_error(e, self.file.path())),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Writes the default configuration unless config.toml already exists.
    /// Returns `true` when a file was written.
    pub fn write_default(&self) -> Result<bool> {
        if self.file.path().exists() {
            return Ok(false);
        }
        self.save(&AppConfig::default())?;
        Ok(true)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file
            .save(config)
            .map_err(|e| to_forge_error(e, self.file.path()))
    }
}

fn to_forge_error(err: AtomicFileError, path: &std::path::Path) -> ForgeError {
    match err {
        AtomicFileError::IoError(e) => e.into(),
        AtomicFileError::TomlError(e) => {
            ForgeError::config(format!("Invalid {}: {}", path.display(), e))
        }
        AtomicFileError::TomlSerError(e) => e.into(),
        AtomicFileError::LockError(msg) => ForgeError::internal(msg),
    }
}
