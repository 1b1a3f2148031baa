//! The backend-agnostic key-value store.
//!
//! [`KeyValueStore`] wraps exactly one storage engine behind a uniform
//! interface. Callers issue single-key reads and durable writes directly,
//! or accumulate multiple mutations into a [`Batch`] and commit them
//! atomically.

mod batch;

pub use batch::Batch;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::engine::{BatchOp, KeyValueBackend, StorageError, StorageResult};

/// A durable key-value store bound to one backend engine instance.
///
/// The store owns its engine handle; its lifetime ends at [`close`], after
/// which every operation fails with [`StorageError::Closed`]. There is no
/// implicit reopening.
///
/// # Concurrency
///
/// All methods take `&self` and are safe to call from multiple threads; the
/// engine provides the locking for point operations. The only state this
/// layer adds is an atomic closed flag.
///
/// # Latency
///
/// Every `set` and every [`Batch::write`] performs synchronous disk I/O and
/// does not return until the data is on stable storage. Callers writing
/// several related keys should batch them: one commit pays for one sync,
/// however many operations it carries.
///
/// [`close`]: KeyValueStore::close
pub struct KeyValueStore {
    backend: Box<dyn KeyValueBackend>,
    closed: AtomicBool,
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("backend", &self.backend.name())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

impl KeyValueStore {
    /// Wrap an open backend engine.
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        debug!(backend = backend.name(), "key-value store ready");
        Self { backend, closed: AtomicBool::new(false) }
    }

    /// The registry name of the underlying engine.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Durably write a key-value pair, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Closed`] after [`close`](Self::close); engine
    /// failures are surfaced unmodified.
    pub fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.ensure_open()?;
        self.backend.set(key, value)
    }

    /// Look up a key.
    ///
    /// `Ok(None)` is a genuine absence: the key was never committed, or its
    /// last committed operation was a delete. `Ok(Some(value))` reflects the
    /// most recent committed write or batch for that key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Closed`] after [`close`](Self::close); engine
    /// failures are surfaced unmodified. A miss is never an error.
    pub fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.ensure_open()?;
        self.backend.get(key)
    }

    /// Allocate a fresh, empty batch bound to this store.
    pub fn batch(&self) -> Batch<'_> {
        Batch::new(self)
    }

    /// Flush outstanding state and release the engine.
    ///
    /// Callers must quiesce in-flight operations first; the store does not
    /// drain them. Exactly one close succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Closed`] when the store was already closed.
    pub fn close(&self) -> StorageResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StorageError::Closed);
        }
        debug!(backend = self.backend.name(), "closing key-value store");
        self.backend.close()
    }

    /// Commit a batch's operations through the engine.
    pub(crate) fn write_batch(&self, ops: Vec<BatchOp>) -> StorageResult<()> {
        self.ensure_open()?;
        if ops.is_empty() {
            return Ok(());
        }
        self.backend.write_batch(ops)
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;

    fn memory_store() -> KeyValueStore {
        KeyValueStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = memory_store();

        store.set(b"key", b"value").expect("set failed");
        assert_eq!(store.get(b"key").expect("get failed"), Some(b"value".to_vec()));
    }

    #[test]
    fn close_is_exactly_once() {
        let store = memory_store();

        store.close().expect("first close failed");
        assert!(matches!(store.close(), Err(StorageError::Closed)));
    }

    #[test]
    fn operations_after_close_fail() {
        let store = memory_store();
        store.set(b"key", b"value").expect("set failed");
        store.close().expect("close failed");

        assert!(matches!(store.set(b"key", b"other"), Err(StorageError::Closed)));
        assert!(matches!(store.get(b"key"), Err(StorageError::Closed)));

        let batch = store.batch();
        assert!(matches!(batch.write(), Err(StorageError::Closed)));
    }
}
