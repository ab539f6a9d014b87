//! `recipebook.toml`: where the recipe database lives

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "recipebook.toml";
const DATA_DIR: &str = ".recipebook";
const DATABASE_FILE: &str = "recipes.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecipebookConfig {
    /// Path to the SQLite database file, relative to the working directory
    pub database: Option<String>,
}

impl RecipebookConfig {
    pub fn for_database(path: &Path) -> Self {
        Self { database: Some(path.to_string_lossy().into_owned()) }
    }

    /// Read a config file. A missing file is not an error.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        let config = toml::from_str(&contents)
            .with_context(|| format!("invalid recipebook config in {}", path.display()))?;
        Ok(Some(config))
    }

    /// Write the config, refusing to replace an existing file unless `overwrite`
    pub fn save(&self, path: &Path, overwrite: bool) -> anyhow::Result<()> {
        if path.exists() && !overwrite {
            anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Configured database file resolved against `base`
    pub fn database_path(&self, base: &Path) -> Option<PathBuf> {
        self.database.as_deref().map(|db| base.join(db))
    }
}

pub fn config_path(flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn default_database_path(base: &Path) -> PathBuf {
    base.join(DATA_DIR).join(DATABASE_FILE)
}

/// Database path: explicit flag, then config file, then the default under `base`
pub fn resolve_database_path(
    flag: Option<&Path>,
    config: Option<&RecipebookConfig>,
    base: &Path,
) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.database_path(base)))
        .unwrap_or_else(|| default_database_path(base))
}

/// Create the directory the database file will live in
pub fn create_database_dir(db_path: &Path) -> anyhow::Result<()> {
    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_database_path_precedence() {
        let base = Path::new("/work");
        let config = RecipebookConfig { database: Some("kitchen/from-config.db".to_string()) };

        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config), base),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            resolve_database_path(None, Some(&config), base),
            PathBuf::from("/work/kitchen/from-config.db")
        );
        assert_eq!(
            resolve_database_path(None, Some(&RecipebookConfig::default()), base),
            PathBuf::from("/work/.recipebook/recipes.db")
        );
        assert_eq!(
            resolve_database_path(None, None, base),
            PathBuf::from("/work/.recipebook/recipes.db")
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = RecipebookConfig::for_database(Path::new("kitchen.db"));

        config.save(&path, false).unwrap();
        assert!(config.save(&path, false).is_err());
        config.save(&path, true).unwrap();

        assert_eq!(RecipebookConfig::load(&path).unwrap(), Some(config));
        assert_eq!(RecipebookConfig::load(&dir.path().join("missing.toml")).unwrap(), None);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "database = [").unwrap();

        let err = RecipebookConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid recipebook config"));
    }

    #[test]
    fn test_create_database_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("recipes.db");
        create_database_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
        create_database_dir(Path::new("recipes.db")).unwrap();
    }
}
