//! Storage error types.

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// A lookup miss is deliberately absent from this enum: `get` signals an
/// absent key with `Ok(None)`. Every variant here is a real failure, so
/// callers never have to match on error text to detect "not found".
#[derive(Debug, Error)]
pub enum StorageError {
    /// A required option is missing from the backend configuration.
    #[error("missing required option `{0}` in backend configuration")]
    MissingOption(&'static str),

    /// A backend option is present but has the wrong type.
    #[error("backend option `{key}` is not a {expected}")]
    InvalidOption {
        /// The offending option key.
        key: String,
        /// The type the option was expected to hold.
        expected: &'static str,
    },

    /// No backend is registered under the requested name.
    #[error("unknown storage backend `{0}`")]
    UnknownBackend(String),

    /// The backend failed to open (lock held by another process, invalid
    /// path, disk error).
    #[error("failed to open storage backend: {0}")]
    Open(String),

    /// The backend reported a failure during an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store has been closed; no further operations are possible.
    #[error("key-value store has been closed")]
    Closed,
}

impl StorageError {
    /// Whether this is a configuration error the caller can fix and retry.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::MissingOption(_) | Self::InvalidOption { .. })
    }

    /// Whether the backend failed to open.
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}
