//! Storage backend implementations.
//!
//! This module contains the concrete engines behind [`KeyValueStore`].
//!
//! # Available Backends
//!
//! - [`sled`] - log-structured embedded engine, the default
//! - [`redb`] - B-tree embedded engine with ACID transactions
//! - [`memory`] - in-process map for tests and tooling
//!
//! [`KeyValueStore`]: crate::store::KeyValueStore

pub mod memory;
pub mod redb;
pub mod sled;

pub use self::memory::MemoryBackend;
pub use self::redb::RedbBackend;
pub use self::sled::SledBackend;
