//! Core error types for glowtrack-core.
//!
//! This module defines the error hierarchy using thiserror. Only write-side
//! storage failures reach callers of the routine operations; read-side
//! failures are recovered inside the stores.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for glowtrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The data directory could not be created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[source] std::io::Error),

    /// Reading a key failed
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// The blocking worker running a statement went away
    #[error("Storage worker failed: {0}")]
    Worker(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The analysed photo did not contain a face
    #[error("No face detected in the analysed photo")]
    NoFaceDetected,

    /// Unknown profile field
    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl StorageError {
    /// Map a rusqlite failure on `key` into a read error.
    pub fn read(key: &str, err: rusqlite::Error) -> Self {
        match lock_state(&err) {
            Some(locked) => locked,
            None => StorageError::ReadFailed {
                key: key.to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Map a rusqlite failure on `key` into a write error.
    pub fn write(key: &str, err: rusqlite::Error) -> Self {
        match lock_state(&err) {
            Some(locked) => locked,
            None => StorageError::WriteFailed {
                key: key.to_string(),
                message: err.to_string(),
            },
        }
    }
}

fn lock_state(err: &rusqlite::Error) -> Option<StorageError> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
            Some(StorageError::Locked)
        }
        _ => None,
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::Worker(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_the_key() {
        let err = StorageError::write("routineData", rusqlite::Error::InvalidQuery);
        assert!(err.to_string().contains("routineData"));
        assert!(matches!(err, StorageError::WriteFailed { .. }));
    }

    #[test]
    fn storage_error_converts_into_core_error() {
        let core: CoreError = StorageError::Locked.into();
        assert_eq!(core.to_string(), "Storage error: Database is locked");
    }
}
