//! Application configuration loaded from an optional TOML file.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "mythos-atlas.toml";
pub const CONFIG_PATH_ENV: &str = "MYTHOS_ATLAS_CONFIG";

pub const REVIEW_STORAGE_KEY: &str = "mythos-atlas-review";
pub const PROGRESS_STORAGE_KEY: &str = "mythos-atlas-progress";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub database_path: PathBuf,
    pub review_storage_key: String,
    pub progress_storage_key: String,
    /// Use the date stored in the database instead of the system date.
    pub simulated_clock: bool,
    /// JSON file replacing the built-in deity and story tables.
    pub reference_data: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("mythos-atlas.sqlite3"),
            review_storage_key: REVIEW_STORAGE_KEY.to_string(),
            progress_storage_key: PROGRESS_STORAGE_KEY.to_string(),
            simulated_clock: false,
            reference_data: None,
        }
    }
}

impl AtlasConfig {
    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: AtlasConfig = toml::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Path named by `MYTHOS_ATLAS_CONFIG`, or `mythos-atlas.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AtlasConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AtlasConfig::default());
        assert_eq!(config.review_storage_key, "mythos-atlas-review");
        assert!(!config.simulated_clock);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atlas.toml");
        fs::write(&path, "simulated_clock = true\ndatabase_path = \"review.db\"\n").unwrap();

        let config = AtlasConfig::load(&path).unwrap();
        assert!(config.simulated_clock);
        assert_eq!(config.database_path, PathBuf::from("review.db"));
        assert_eq!(config.progress_storage_key, PROGRESS_STORAGE_KEY);
        assert_eq!(config.reference_data, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atlas.toml");
        fs::write(&path, "simulated_clock = \"maybe\"").unwrap();

        let result = AtlasConfig::load(&path);
        assert!(matches!(result, Err(AtlasError::Config(_))));
    }
}
