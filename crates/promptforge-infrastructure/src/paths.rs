//! Unified path management for PromptForge files.
//!
//! The default root is resolved through `AppPaths` from the version-migrate
//! crate, which picks the platform config directory (XDG on Linux/macOS,
//! the roaming profile on Windows).

use std::path::{Path, PathBuf};
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_NAME: &str = "promptforge";

/// Resolves every file location used by the application.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/promptforge/       # Root (or the explicit base directory)
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// ├── history/                 # Key-value store holding the history
/// └── logs/                    # Application logs
///     └── promptforge.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForgePaths {
    base: Option<PathBuf>,
}

impl ForgePaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the root directory all other paths live under.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => AppPaths::new(APP_NAME)
                .config_dir()
                .map_err(|_| PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the directory of the history key-value store.
    pub fn history_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("history"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Default destination for exported prompts: the user's download
    /// directory, falling back to the current directory.
    pub fn default_export_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_dir() {
        let paths = ForgePaths::new(Some(Path::new("/tmp/pf")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/pf"));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/pf/config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            PathBuf::from("/tmp/pf/secret.json")
        );
        assert_eq!(paths.history_dir().unwrap(), PathBuf::from("/tmp/pf/history"));
        assert_eq!(paths.logs_dir().unwrap(), PathBuf::from("/tmp/pf/logs"));
    }

    #[test]
    fn test_default_config_dir() {
        let config_dir = ForgePaths::default().config_dir().unwrap();
        assert!(config_dir.ends_with("promptforge"));
    }
}
