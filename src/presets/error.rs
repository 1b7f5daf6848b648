//! Error types for preset storage

use std::io;
use thiserror::Error;

use crate::methods::MethodError;

/// Errors that can occur while managing presets
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("Preset '{0}' already exists")]
    AlreadyExists(String),

    /// Name and reason
    #[error("Invalid preset name '{0}': {1}")]
    InvalidName(String, String),

    #[error("Preset '{0}' has no methods")]
    Empty(String),

    /// A stored method cannot be compiled
    #[error("Invalid method in preset: {0}")]
    InvalidMethod(#[from] MethodError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<toml::de::Error> for PresetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for PresetError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
