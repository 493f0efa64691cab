//! Error types for job files.

use std::io;
use thiserror::Error;

/// Errors raised while loading, saving or running a job file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The job file could not be loaded.
    #[error("Failed to load job: {0}")]
    LoadError(String),

    /// The job file could not be saved.
    #[error("Failed to save job: {0}")]
    SaveError(String),

    /// Only `.json` and `.toml` are understood.
    #[error("Unsupported job format: {0}")]
    UnsupportedFormat(String),

    /// A job field is invalid.
    #[error("Invalid job field '{key}': {reason}")]
    InvalidJob { key: String, reason: String },

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
    TomlSerError(#[from] toml::ser::Error),

    /// Geometry or parameter error from the router.
    #[error(transparent)]
    Core(#[from] floorcoil_core::Error),
}

impl From<floorcoil_core::GeometryError> for SettingsError {
    fn from(err: floorcoil_core::GeometryError) -> Self {
        SettingsError::Core(err.into())
    }
}

/// Result type alias for job operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
