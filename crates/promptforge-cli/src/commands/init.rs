use anyhow::{Context, Result};
use colored::Colorize;
use promptforge_infrastructure::storage::SecretStorage;
use promptforge_infrastructure::{ConfigService, ForgePaths};

/// Lays down config.toml and a secret.json skeleton. Existing files are kept.
pub fn run(paths: &ForgePaths) -> Result<()> {
    let config = ConfigService::new(paths)?;
    if config.write_default()? {
        println!("{} {}", "Created".green(), config.path().display());
    } else {
        println!("{} {}", "Exists ".bright_black(), config.path().display());
    }

    let secrets = SecretStorage::new(paths.secret_file()?);
    let created = secrets
        .write_template()
        .with_context(|| format!("Failed to write {}", secrets.path().display()))?;
    if created {
        println!("{} {}", "Created".green(), secrets.path().display());
    } else {
        println!("{} {}", "Exists ".bright_black(), secrets.path().display());
    }

    println!();
    println!(
        "Add your Gemini API key to {} or set {}.",
        secrets.path().display(),
        "GEMINI_API_KEY".bright_cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ForgePaths::new(Some(temp_dir.path()));

        run(&paths).unwrap();
        run(&paths).unwrap();

        assert!(paths.config_file().unwrap().exists());
        assert!(paths.secret_file().unwrap().exists());
    }
}
