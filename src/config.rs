//! Engine configuration loaded from TOML.
//!
//! The path comes from `SPROUTS_CONFIG`; when unset every field takes its
//! default. Example:
//!
//! ```toml
//! storage_dir = "/var/lib/sprouts"
//! content_dir = "./content"
//!
//! [analytics]
//! mode = "log"
//! debounce_ms = 2000
//! retention_days = 30
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::services::AnalyticsConfig;

pub const CONFIG_ENV: &str = "SPROUTS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory with `<pack>.json` overrides for the built-in packs.
    pub content_dir: Option<PathBuf>,
    /// Where the file-backed store keeps its JSON files.
    pub storage_dir: PathBuf,
    pub analytics: AnalyticsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            content_dir: None,
            storage_dir: PathBuf::from(".sprouts"),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&raw, path)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Read the file named by `SPROUTS_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => {
                debug!("{CONFIG_ENV} not set, using default config");
                Ok(Self::default())
            }
        }
    }
}
