//! Storage engine traits and abstractions.
//!
//! This module defines the contract a storage backend must satisfy:
//!
//! - [`KeyValueBackend`] - point operations plus atomic batch commit
//! - [`BatchOp`] - a single pending mutation inside a batch
//!
//! # Error Handling
//!
//! All operations return [`StorageResult<T>`] which is an alias for
//! `Result<T, StorageError>`. See [`StorageError`] for the possible variants.

mod error;
mod traits;

pub use error::{StorageError, StorageResult};
pub use traits::{BatchOp, KeyValueBackend};
