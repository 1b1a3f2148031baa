//! Aurum Storage
//!
//! This crate provides the key-value persistence layer for the Aurum node:
//! a backend-agnostic store abstraction, atomic write batches, and a factory
//! that resolves a named backend plus a configuration map into a ready store.
//!
//! # Overview
//!
//! Every node subsystem that needs durable storage (chain state, block index,
//! trie nodes) goes through [`KeyValueStore`]. The store wraps exactly one
//! embedded engine behind a uniform interface, so callers never depend on a
//! specific backend. Single-key writes are synchronously durable; multi-key
//! updates that must become visible together go through a [`Batch`], which
//! commits all of its operations in one atomic, durable step.
//!
//! # Core Types
//!
//! - [`KeyValueStore`] - the owning adapter around one backend engine
//! - [`Batch`] - an accumulator of pending mutations, applied atomically
//! - [`KeyValueBackend`] - the trait a storage engine implements
//! - [`StorageFactory`] - registry resolving backend names to constructors
//!
//! # Error Handling
//!
//! All operations return [`StorageResult<T>`], an alias for
//! `Result<T, StorageError>`. A lookup miss is not an error: `get` returns
//! `Ok(None)` for an absent key, so callers can tell "key absent" from
//! "storage malfunctioning" without inspecting error messages.
//!
//! # Example
//!
//! ```ignore
//! use aurum_storage::{BackendOptions, StorageFactory, DEFAULT_BACKEND};
//!
//! let factory = StorageFactory::default();
//! let store = factory.open(DEFAULT_BACKEND, &BackendOptions::with_path("./data/blockchain"))?;
//!
//! // Single durable write
//! store.set(b"head", b"0xabc")?;
//!
//! // Atomic multi-key update
//! let mut batch = store.batch();
//! batch.put(b"block:1", b"...");
//! batch.put(b"receipt:1", b"...");
//! batch.write()?;
//!
//! store.close()?;
//! ```
//!
//! # Modules
//!
//! - [`engine`] - backend trait, batch operations, and error types
//! - [`store`] - the backend-agnostic store and batch
//! - [`factory`] - backend registry and configuration options
//! - [`backends`] - concrete engine implementations

pub mod backends;
pub mod engine;
pub mod factory;
pub mod store;

pub use engine::{BatchOp, KeyValueBackend, StorageError, StorageResult};
pub use factory::{BackendOptions, StorageFactory, DEFAULT_BACKEND};
pub use store::{Batch, KeyValueStore};
