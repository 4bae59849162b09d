//! Export surface: markdown download and clipboard copy.
//!
//! Both are fire-and-forget from the caller's point of view: failures are
//! logged and reported, never retried.

use chrono::{DateTime, Utc};
use promptforge_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated prompts as markdown files.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name derived from the export instant.
    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("optimized-prompt-{}.md", now.timestamp_millis())
    }

    /// Writes `text` to `<dir>/optimized-prompt-<millis>.md` and returns the path.
    pub fn export(&self, text: &str, now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(now));
        fs::write(&path, text).inspect_err(|e| {
            tracing::error!("Failed to export prompt to {}: {}", path.display(), e);
        })?;
        tracing::info!("Exported prompt to {}", path.display());
        Ok(path)
    }
}

/// Copies the given text to the system clipboard.
///
/// # Returns
///
/// * `Ok(())` if the text was copied successfully.
/// * `Err(String)` with an error message if copying failed.
pub fn copy_to_clipboard(text: &str) -> std::result::Result<(), String> {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                let err_msg = format!("Failed to set clipboard text: {}", e);
                tracing::error!("{}", err_msg);
                Err(err_msg)
            } else {
                Ok(())
            }
        }
        Err(e) => {
            let err_msg = format!("Failed to initialize clipboard: {}", e);
            tracing::error!("{}", err_msg);
            Err(err_msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_uses_epoch_millis() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(
            MarkdownExporter::file_name(now),
            "optimized-prompt-1700000000123.md"
        );
    }

    #[test]
    fn test_export_writes_text() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = MarkdownExporter::new(temp_dir.path().join("out"));

        let path = exporter.export("Role: tester", Utc::now()).unwrap();
        assert!(path.starts_with(temp_dir.path().join("out")));
        assert_eq!(fs::read_to_string(path).unwrap(), "Role: tester");
    }
}
