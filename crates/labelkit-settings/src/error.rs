//! Error types for the settings crate.
//!
//! Loading, validating and planning a run can fail in three layers: the
//! file itself, an individual value, or the derived page grid.

use labelkit_core::LayoutError;
use labelkit_generators::GenerationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or resolving a configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The output file exists and overwriting is off.
    #[error("Output file exists: {}. Use --overwrite to replace.", .0.display())]
    OutputExists(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    /// A configuration structure error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The page grid could not be resolved.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// A generator could not be built from its settings.
    #[error("Generator error: {0}")]
    Generation(#[from] GenerationError),
}

impl SettingsError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors related to configuration structure.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required configuration key is missing.
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

impl ConfigError {
    pub fn out_of_range(key: &str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
