//! User configuration, read from `~/.config/dynform/config.json`.
//!
//! Every key is optional; a missing file means "all defaults".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::schema::{
    CatalogSchemaSource, DEFAULT_LATENCY, MockSchemaSource, SchemaLoadError, SchemaSource,
};

/// Errors that can occur while locating or reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON or has unknown keys.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// The platform does not provide a data directory.
    #[error("could not determine data directory")]
    NoDataDir,
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Artificial delay of the built-in schema source, in milliseconds.
    pub latency_ms: u64,
    /// JSON catalog to serve schemas from instead of the built-in forms.
    pub catalog: Option<PathBuf>,
    /// Log file location; defaults to `<data dir>/dynform/dynform.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            catalog: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads the config from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Loads the config from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns `<config dir>/dynform/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("dynform").join("config.json"))
    }

    /// Returns the configured mock latency.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Returns the log file path, resolving the default under the data directory.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(dir.join("dynform").join("dynform.log"))
    }

    /// Builds the schema source: the catalog file if one is configured,
    /// otherwise the built-in forms with the configured latency.
    pub fn schema_source(&self) -> Result<Arc<dyn SchemaSource>, SchemaLoadError> {
        let source: Arc<dyn SchemaSource> = match &self.catalog {
            Some(path) => Arc::new(CatalogSchemaSource::open(path)?),
            None => Arc::new(MockSchemaSource::builtin(self.latency())?),
        };
        Ok(source)
    }
}
