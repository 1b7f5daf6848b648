//! Configuration module for refile
//!
//! Settings for the rename engine and the command line front end.
//! Configuration is stored in the user's config directory.

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_LIMIT;

const fn default_true() -> bool {
    true
}

const fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

const fn default_numbering_start() -> i64 {
    1
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RefileConfig {
    /// Lift the total path length limit (Windows long path support)
    #[serde(default)]
    pub long_paths: bool,

    /// Refuse renames whose target already exists on disk
    #[serde(default = "default_true")]
    pub check_existing_targets: bool,

    /// Number of batches kept for undo
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// First counter value for `template:` methods given on the command line
    #[serde(default = "default_numbering_start")]
    pub numbering_start: i64,

    /// Zero padding for `template:` counters; 0 means no padding
    #[serde(default)]
    pub numbering_zeros: usize,

    /// Preset storage file, overriding `<config_dir>/refile/presets.toml`
    #[serde(default)]
    pub presets_file: Option<PathBuf>,
}

impl Default for RefileConfig {
    fn default() -> Self {
        Self {
            long_paths: false,
            check_existing_targets: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            quiet: false,
            numbering_start: 1,
            numbering_zeros: 0,
            presets_file: None,
        }
    }
}

impl RefileConfig {
    /// Directory holding refile's configuration files
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("refile"))
    }

    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            log::info!("created default config at {}", config_path.display());
            return Ok(default_config);
        }

        Self::load_from(config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.into()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Where presets are stored
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no override is set and the system config
    /// directory cannot be determined.
    pub fn presets_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.presets_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("presets.toml")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RefileConfig::default();
        assert!(!config.long_paths);
        assert!(config.check_existing_targets);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.numbering_start, 1);
        assert_eq!(config.numbering_zeros, 0);
        assert!(config.presets_file.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = RefileConfig {
            long_paths: true,
            history_limit: 5,
            numbering_zeros: 3,
            presets_file: Some(PathBuf::from("/tmp/presets.toml")),
            ..RefileConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = RefileConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = RefileConfig::load_from(&path).unwrap();

        assert!(loaded.quiet);
        assert!(loaded.check_existing_targets);
        assert_eq!(loaded.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(loaded.numbering_start, 1);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_limit = \"lots\"\n").unwrap();

        assert!(RefileConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_presets_path_override() {
        let config = RefileConfig {
            presets_file: Some(PathBuf::from("/srv/refile/presets.toml")),
            ..RefileConfig::default()
        };
        assert_eq!(
            config.presets_path().unwrap(),
            PathBuf::from("/srv/refile/presets.toml")
        );
    }
}
