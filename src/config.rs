//! Configuration for the store engine and the service surface.
//!
//! Loaded from a JSON file (`everkv.json` by convention); every field
//! has a default so a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::proto::{mask_of, BooleanFeature, Feature};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub service: ServiceConfig,
}

/// Store engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory for the entry log. Must live outside whatever a
    /// factory reset wipes; the deployer picks the partition.
    pub persist_dir: PathBuf,

    /// Rewrite the log on open when dead records outnumber live ones.
    pub auto_compact: bool,

    /// Minimum number of dead records before auto-compaction triggers.
    pub compact_dead_min: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist_dir: PathBuf::from("./everkv"),
            auto_compact: true,
            compact_dead_min: 64,
        }
    }
}

impl StoreConfig {
    /// Creates a config rooted at `persist_dir` with defaults otherwise.
    pub fn at(persist_dir: impl Into<PathBuf>) -> Self {
        Self {
            persist_dir: persist_dir.into(),
            ..Self::default()
        }
    }
}

/// Service surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Features the service reports as supported.
    pub supported_features: Vec<Feature>,

    /// Boolean-capable features that start enabled.
    pub enabled_by_default: Vec<BooleanFeature>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            supported_features: Feature::ALL.to_vec(),
            enabled_by_default: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// The 32-bit capability mask for the configured features.
    pub fn supported_mask(&self) -> u32 {
        mask_of(&self.supported_features)
    }

    /// Whether a boolean feature starts enabled.
    pub fn default_state(&self, feature: BooleanFeature) -> bool {
        self.enabled_by_default.contains(&feature)
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads configuration from a JSON file, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }
}
