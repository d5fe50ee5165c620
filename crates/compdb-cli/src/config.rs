//! `load-compilations` settings: defaults, then an optional TOML file, then flags.

use compdb_batch::DEFAULT_CHANNEL_CAPACITY;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_STORE_PATH: &str = ".compdb/store.jsonl";
pub const DEFAULT_BATCH_SIZE: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoadConfig {
    pub store: String,
    pub batch_size: usize,
    pub channel_capacity: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            store: DEFAULT_STORE_PATH.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl LoadConfig {
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        config.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text, &display)
    }

    /// Apply command-line flags on top of file/default values.
    pub fn with_overrides(
        mut self,
        store: Option<String>,
        batch_size: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(store) = store {
            self.store = store;
        }
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Zero {
                field: "batch-size",
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Zero {
                field: "channel-capacity",
            });
        }
        Ok(self)
    }
}

/// Resolve the effective settings for one run.
pub fn resolve(
    config_path: Option<&str>,
    store: Option<String>,
    batch_size: Option<usize>,
) -> Result<LoadConfig, ConfigError> {
    let base = match config_path {
        Some(path) => LoadConfig::from_path(path)?,
        None => LoadConfig::default(),
    };
    base.with_overrides(store, batch_size)
}
