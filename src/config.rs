//! Configuration management
//!
//! Manages tracker configuration: where the preferences database lives,
//! which preference set and key hold the history, and display options.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_HISTORY_KEY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// SQLite file holding the preferences (defaults to the data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Name of the preference set
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Key the history string is stored under
    #[serde(default = "default_history_key")]
    pub history_key: String,
}

fn default_namespace() -> String {
    "DoordashTrackerPrefs".to_string()
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            namespace: default_namespace(),
            history_key: default_history_key(),
        }
    }
}

impl StorageConfig {
    /// Database path, falling back to the data directory
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("tracker.db")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Entries shown in the "next to fall off" panel
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,
    /// Cells per row in the full history grid
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    /// Colorize output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_preview_count() -> usize {
    5
}

fn default_grid_columns() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_count: default_preview_count(),
            grid_columns: default_grid_columns(),
            color: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config.sanitized())
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    // Zero-width panels are not useful; fall back to the defaults.
    fn sanitized(mut self) -> Self {
        if self.display.grid_columns == 0 {
            self.display.grid_columns = default_grid_columns();
        }
        if self.display.preview_count == 0 {
            self.display.preview_count = default_preview_count();
        }
        self
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "order-tracker", "order-tracker")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "order-tracker", "order-tracker")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}

/// Show current configuration
pub fn show_config(config: &Config, path: &Path) -> Result<()> {
    let database = config.storage.resolved_database_path()?;

    println!("Configuration ({})", path.display());
    println!("  Storage:");
    println!("    database:       {}", database.display());
    println!("    namespace:      {}", config.storage.namespace);
    println!("    history key:    {}", config.storage.history_key);
    println!("  Display:");
    println!("    preview count:  {}", config.display.preview_count);
    println!("    grid columns:   {}", config.display.grid_columns);
    println!("    color:          {}", if config.display.color { "on" } else { "off" });

    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.namespace, "DoordashTrackerPrefs");
        assert_eq!(config.storage.history_key, "orderHistory");
        assert_eq!(config.display.preview_count, 5);
        assert_eq!(config.display.grid_columns, 10);
        assert!(config.display.color);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ngrid_columns = 0\ncolor = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.display.grid_columns, 10);
        assert!(!config.display.color);
        assert_eq!(config.storage.history_key, "orderHistory");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.storage.database_path = Some(dir.path().join("tracker.db"));
        config.display.preview_count = 3;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let parsed: Config = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
