//! Configuration module for chainscope
//!
//! Handles loading and managing configuration from TOML files.

pub mod settings;

pub use settings::{BatchSettings, RetrievalSettings, Settings};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from `path` if given, otherwise from the default location
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
