//! Error types for clientbook.
//!
//! This module defines all error types used throughout the clientbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::client::Field;

/// The main error type for clientbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to open or create the record store.
    #[error("failed to open the client store at {path}: {source}")]
    StoreOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A read against the record store failed.
    #[error("could not {operation}: {source}")]
    StoreRead {
        /// What the caller was trying to read.
        operation: &'static str,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A write against the record store failed.
    #[error("could not {operation}: {source}")]
    StoreWrite {
        /// What the caller was trying to write.
        operation: &'static str,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// An update targeted a client id that is not in the store.
    #[error("client {id} does not exist")]
    ClientNotFound {
        /// The missing id.
        id: i64,
    },

    /// The store was written by a newer schema than this build understands.
    #[error("unsupported schema version {found} (this build supports {supported})")]
    SchemaVersion {
        /// Version recorded in the store.
        found: i32,
        /// Version this build writes.
        supported: i32,
    },

    // === Validation Errors ===
    /// A field value was rejected.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The rejected field.
        field: Field,
        /// Why it was rejected.
        reason: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for clientbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a validation error for a field.
    #[must_use]
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Wrap a storage engine failure raised while reading.
    #[must_use]
    pub fn store_read(operation: &'static str, source: rusqlite::Error) -> Self {
        Self::StoreRead { operation, source }
    }

    /// Wrap a storage engine failure raised while writing.
    #[must_use]
    pub fn store_write(operation: &'static str, source: rusqlite::Error) -> Self {
        Self::StoreWrite { operation, source }
    }

    /// Check if this error came from the record store.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::StoreOpen { .. }
                | Self::StoreRead { .. }
                | Self::StoreWrite { .. }
                | Self::SchemaVersion { .. }
        )
    }

    /// Check if this error is fatal to persistence for the session.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreOpen { .. } | Self::SchemaVersion { .. })
    }

    /// Check if this error reports a missing client.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClientNotFound { .. })
    }
}
