//! Error types for the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
pub enum CliError {
    /// No data directory specified.
    #[error("no data directory specified. Use --data-dir or set AURUM_DATA_DIR")]
    NoDataDir,

    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] aurum_storage::StorageError),

    /// A key or value argument was not valid hex.
    #[error("invalid hex argument `{0}`")]
    InvalidHex(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file already exists.
    #[error("refusing to overwrite existing file: {0}")]
    FileExists(PathBuf),
}
