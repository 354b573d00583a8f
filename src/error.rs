//! Error types for authdb operations.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! bootstrap path: directory preparation, opening the database and
//! applying the schema.

use thiserror::Error;

/// Result type alias for authdb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for authdb operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (opening the database, schema, queries).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (directory preparation).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The database file could not be opened or is not a database.
    #[error("failed to open database: {path}: {reason}")]
    Open {
        /// Path of the database file.
        path: String,
        /// Underlying `SQLite` message.
        reason: String,
    },

    /// Applying the schema description failed.
    #[error("schema error: {0}")]
    Schema(String),

    /// Database query error after the handle was opened.
    #[error("database error: {0}")]
    Database(String),

    /// Closing the connection failed.
    #[error("failed to close database: {0}")]
    Close(String),
}

/// I/O-specific errors for filesystem preparation.
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

impl Error {
    /// Returns `true` for errors raised while preparing the storage directory.
    #[must_use]
    pub const fn is_directory_error(&self) -> bool {
        matches!(self, Self::Io(IoError::DirectoryFailed { .. }))
    }

    /// Returns `true` for errors raised while opening the database file.
    #[must_use]
    pub const fn is_open_error(&self) -> bool {
        matches!(self, Self::Storage(StorageError::Open { .. }))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_open_display() {
        let err = StorageError::Open {
            path: "/tmp/auth.db".to_string(),
            reason: "file is not a database".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open database: /tmp/auth.db: file is not a database"
        );
    }

    #[test]
    fn test_directory_failed_display() {
        let err = IoError::DirectoryFailed {
            path: "/root/dev_db".to_string(),
            reason: "Permission denied (os error 13)".to_string(),
        };
        assert!(err.to_string().contains("/root/dev_db"));
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_error_classification() {
        let err: Error = IoError::DirectoryFailed {
            path: "x".to_string(),
            reason: "y".to_string(),
        }
        .into();
        assert!(err.is_directory_error());
        assert!(!err.is_open_error());

        let err: Error = StorageError::Open {
            path: "x".to_string(),
            reason: "y".to_string(),
        }
        .into();
        assert!(err.is_open_error());
        assert!(!err.is_directory_error());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(IoError::Generic(_))));
    }

    #[test]
    fn test_from_rusqlite_error_to_error() {
        let rusqlite_err = rusqlite::Error::InvalidQuery;
        let err: Error = rusqlite_err.into();
        assert!(matches!(err, Error::Storage(StorageError::Database(_))));
    }

    #[test]
    fn test_storage_error_variants() {
        let err = StorageError::Schema("no such table".to_string());
        assert!(err.to_string().contains("no such table"));

        let err = StorageError::Close("busy".to_string());
        assert!(err.to_string().contains("busy"));
    }
}
