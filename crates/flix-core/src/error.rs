//! Error types for the catalog core.
//!
//! This module provides a unified error type with explicit variants for
//! storage, authentication and input validation failures.

use thiserror::Error;

/// The unified error type for catalog operations.
///
/// A malformed persisted modification log is never reported through this
/// type: the content store recovers from it locally and keeps serving the
/// base catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// Persistence backend errors (unavailable, over quota, I/O).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication errors (bad credentials, missing admin rights).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (bad rating, empty title, bad catalog).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Persistence backend errors.
///
/// These are recoverable: the caller of a mutation learns that the change
/// was not saved, while browsing the catalog keeps working.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or opened.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    /// Writing the value would exceed the backend's quota.
    #[error("quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// Generic I/O failure.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair not recognised.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The operation requires an administrator.
    #[error("administrator access required")]
    NotAdmin,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Title is empty or whitespace.
    #[error("title cannot be empty")]
    Title,

    /// Rating outside the 0 to 5 range.
    #[error("rating {value} is outside 0..=5")]
    Rating { value: f64 },

    /// Series must have at least one season.
    #[error("seasons must be at least 1")]
    Seasons,

    /// The base catalog could not be loaded.
    #[error("invalid catalog: {reason}")]
    Catalog { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl From<serde_json::Error> for InvalidInputError {
    fn from(err: serde_json::Error) -> Self {
        InvalidInputError::Other {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(InvalidInputError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_message_names_key() {
        let err: Error = StorageError::QuotaExceeded {
            key: "contentModifications".to_string(),
            needed: 120,
            quota: 64,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("storage error"));
        assert!(msg.contains("contentModifications"));
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert!(matches!(err, Error::Storage(StorageError::Io { .. })));
    }
}
