//! Core error types for checkin-core.
//!
//! Rejections of a check-in (`CheckinError`) are expected, user-facing
//! outcomes. Storage and configuration failures are infrastructure errors
//! and are wrapped by [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for checkin-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A check-in was rejected
    #[error("Check-in rejected: {0}")]
    Checkin(#[from] CheckinError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Reasons a check-in submission is refused.
///
/// None of these mutate state; the form may be resubmitted right away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckinError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{name} has already checked in!")]
    DuplicateName { name: String },

    #[error("Sorry, the event has reached maximum capacity ({capacity}).")]
    CapacityReached { capacity: usize },
}

/// Submission validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    EmptyName,

    #[error("Please select a team.")]
    MissingTeam,

    #[error("Unknown team '{0}' (expected water, zero or power)")]
    UnknownTeam(String),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),

    /// State could not be serialized for writing
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
