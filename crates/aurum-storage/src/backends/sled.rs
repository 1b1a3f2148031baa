//! Sled storage backend.
//!
//! Sled is a log-structured embedded engine; this is the node's default
//! on-disk store. Sled acknowledges inserts before they reach stable
//! storage, so every write here is followed by an explicit flush: the
//! durability contract is "synced before success", and batching exists
//! precisely to amortize that flush across many operations.

use std::path::Path;

use tracing::debug;

use crate::engine::{BatchOp, KeyValueBackend, StorageError, StorageResult};
use crate::factory::BackendOptions;
use crate::store::KeyValueStore;

/// Registry name for this backend.
pub const BACKEND_NAME: &str = "sled";

/// Default page-cache capacity in bytes.
pub const DEFAULT_CACHE_CAPACITY: u64 = 128 * 1024 * 1024;

/// Option key overriding [`DEFAULT_CACHE_CAPACITY`], in bytes.
pub const CACHE_CAPACITY_KEY: &str = "cache-capacity";

/// Construct a sled-backed [`KeyValueStore`] from factory options.
///
/// # Errors
///
/// A config error when the path option is missing or mistyped;
/// [`StorageError::Open`] when the database cannot be opened, which includes
/// the case of another process already holding the directory lock.
pub fn factory(options: &BackendOptions) -> StorageResult<KeyValueStore> {
    let path = options.require_path()?;
    let cache_capacity =
        options.get_u64(CACHE_CAPACITY_KEY)?.unwrap_or(DEFAULT_CACHE_CAPACITY);

    let backend = SledBackend::open_with_cache(path, cache_capacity)?;
    Ok(KeyValueStore::new(Box::new(backend)))
}

/// Key-value backend over a sled database.
///
/// Sled holds a lock on its directory for the lifetime of the handle, so
/// opening a path that is already open elsewhere fails deterministically
/// instead of corrupting shared state.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Open or create a database at `path` with default tuning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_cache(path, DEFAULT_CACHE_CAPACITY)
    }

    /// Open or create a database at `path` with a custom page-cache size.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or
    /// created.
    pub fn open_with_cache(path: impl AsRef<Path>, cache_capacity: u64) -> StorageResult<Self> {
        let db = sled::Config::default()
            .path(path.as_ref())
            .cache_capacity(cache_capacity)
            .mode(sled::Mode::HighThroughput)
            .open()
            .map_err(|e| StorageError::Open(e.to_string()))?;

        debug!(path = %path.as_ref().display(), cache_capacity, "opened sled database");
        Ok(Self { db })
    }

    fn flush(&self) -> StorageResult<()> {
        self.db.flush().map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueBackend for SledBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.db.insert(key, value).map_err(|e| StorageError::Backend(e.to_string()))?;
        // the write must be on disk before we acknowledge it
        self.flush()
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let value = self.db.get(key).map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> StorageResult<()> {
        let mut batch = sled::Batch::default();
        for op in ops {
            match op {
                BatchOp::Put { key, value } => batch.insert(key, value),
                BatchOp::Delete { key } => batch.remove(key),
            }
        }

        self.db.apply_batch(batch).map_err(|e| StorageError::Backend(e.to_string()))?;
        // one flush covers the whole batch
        self.flush()
    }

    fn close(&self) -> StorageResult<()> {
        debug!("closing sled database");
        self.flush()
    }
}
