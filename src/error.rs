//! Error kinds of the record store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store/persistence operations.
pub type Result<T> = std::result::Result<T, RabbitError>;

/// Errors surfaced by the store, validation and persistence layers.
#[derive(Debug, Error)]
pub enum RabbitError {
    /// Store already holds `capacity` records.
    #[error("store is full ({capacity} items)")]
    Capacity {
        /// Configured bound.
        capacity: usize,
    },

    /// Input rejected by validation (blank name etc).
    #[error("validation failed: {reason}")]
    Validation {
        /// Human readable reason.
        reason: &'static str,
    },

    /// Text is not a well-formed integer.
    #[error("not an integer: {input:?}")]
    Parse {
        /// The offending input.
        input: String,
    },

    /// Data file could not be opened, read or written.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        /// Operation that failed ("open", "read", "write", ...).
        op: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl RabbitError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RabbitError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn is_capacity(&self) -> bool {
        matches!(self, RabbitError::Capacity { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, RabbitError::Io { .. })
    }
}
