//! Application settings configuration
//!
//! Defines connection timeouts and batch concurrency.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Chain retrieval settings
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub handshake_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            handshake_timeout_secs: 10,
        }
    }
}

impl RetrievalSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

/// Batch query settings
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    /// Maximum number of targets in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    16
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub batch: BatchSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would disable timeouts or stall batches
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "retrieval.connect_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.retrieval.handshake_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "retrieval.handshake_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.batch.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.max_concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
