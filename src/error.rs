//! Error types for the school-directory service.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors that can occur in the school-directory service.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Field-level validation failures, recoverable by correcting the input
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    /// Image upload step failed
    #[error("Upload error: {0}")]
    Upload(String),

    /// Store unreachable or a write was rejected
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `DirectoryError`
pub type Result<T> = std::result::Result<T, DirectoryError>;

impl DirectoryError {
    /// True when the failure came from the persistence layer.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Pool(_))
    }
}

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        DirectoryError::Other(err.to_string())
    }
}
