//! Tracker configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! seed_sample_data = true
//! max_field_length = 128
//!
//! [logging]
//! filter = "package_tracker=debug"
//! format = "json"
//! ```

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_MAX_FIELD_LENGTH: usize = 256;
pub const DEFAULT_LOG_FILTER: &str = "package_tracker=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Load the demo packages when the registry starts
    pub seed_sample_data: bool,
    /// Upper bound, in characters, for each contact field
    pub max_field_length: usize,
    pub logging: LoggingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: false,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

impl TrackerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: TrackerConfig = toml::from_str(contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_field_length == 0 {
            return Err(TrackerError::Config(
                "max_field_length must be greater than zero".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(TrackerError::Config(
                "logging.filter must not be empty".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            TrackerError::Config(format!("Invalid logging.filter '{}': {e}", self.logging.filter))
        })?;
        Ok(())
    }
}
