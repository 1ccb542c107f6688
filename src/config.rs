//! Configuration for the search host.
//!
//! Loaded from `~/.config/bt-search/config.toml` (every field optional),
//! then overridden by environment variables.

use std::path::{Path, PathBuf};

use bt_search_core::EngineSettings;
use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};

/// Comma-separated partition list override.
pub const ENV_SEARCH_TABLES: &str = "SEARCH_TABLES";
/// Batch size override. Invalid values are ignored, values below 1 clamp to 1.
pub const ENV_SEARCH_BATCH_SIZE: &str = "SEARCH_BATCH_SIZE";
/// Data directory override.
pub const ENV_DATA_DIR: &str = "BT_SEARCH_DATA_DIR";

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Engine settings handed to the search orchestrator.
    pub search: EngineSettings,
    /// Document store settings.
    pub store: StoreConfig,
}

/// File-backed document store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one `<partition>.json` or `<partition>.jsonl` file
    /// per partition.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Returns the default data directory: `$XDG_DATA_HOME/bt-search` or
/// `~/.local/share/bt-search`.
pub fn default_data_dir() -> PathBuf {
    if let Some(data) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(data).join("bt-search")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("bt-search")
    } else {
        PathBuf::from("/tmp/bt-search-data")
    }
}

fn split_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

impl HostConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HostError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/bt-search/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("bt-search").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("bt-search")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/bt-search-config/config.toml")
        }
    }

    /// Resolve the effective configuration for the process.
    ///
    /// Reads `path` if given (it must exist), otherwise the default path if
    /// present, otherwise starts from defaults. Environment overrides are
    /// applied last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// final engine settings are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.search.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(tables) = lookup(ENV_SEARCH_TABLES) {
            self.search.partitions = split_env_list(&tables);
        }
        if let Some(raw) = lookup(ENV_SEARCH_BATCH_SIZE) {
            match raw.trim().parse::<i64>() {
                Ok(size) => self.search.batch_size = size.max(1) as usize,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid SEARCH_BATCH_SIZE"),
            }
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.store.data_dir = PathBuf::from(dir);
        }
    }
}
