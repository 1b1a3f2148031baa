//! Redb storage backend.
//!
//! Redb is a pure-Rust embedded database with ACID transactions. All data
//! lives in a single table; each point write is its own transaction, and a
//! batch becomes one transaction committing every operation together. Redb
//! syncs on commit, which satisfies the durability contract without any
//! extra flushing.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::engine::{BatchOp, KeyValueBackend, StorageError, StorageResult};
use crate::factory::BackendOptions;
use crate::store::KeyValueStore;

/// Registry name for this backend.
pub const BACKEND_NAME: &str = "redb";

/// Option key for the page-cache size, in bytes.
pub const CACHE_SIZE_KEY: &str = "cache-size";

/// The single table holding all key-value data.
const DATA_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("kv");

/// Construct a redb-backed [`KeyValueStore`] from factory options.
///
/// # Errors
///
/// A config error when the path option is missing or mistyped;
/// [`StorageError::Open`] when the database cannot be opened or created.
pub fn factory(options: &BackendOptions) -> StorageResult<KeyValueStore> {
    let path = options.require_path()?;
    let cache_size = options.get_u64(CACHE_SIZE_KEY)?;

    let backend = RedbBackend::open_with_cache(path, cache_size.map(|c| c as usize))?;
    Ok(KeyValueStore::new(Box::new(backend)))
}

/// Key-value backend over a redb database file.
pub struct RedbBackend {
    db: Database,
}

impl RedbBackend {
    /// Open or create a database file at `path` with redb's default tuning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_cache(path, None)
    }

    /// Open or create a database file at `path` with a custom cache size.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or
    /// created.
    pub fn open_with_cache(
        path: impl AsRef<Path>,
        cache_size: Option<usize>,
    ) -> StorageResult<Self> {
        let mut builder = Database::builder();
        if let Some(cache_size) = cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = builder.create(path.as_ref()).map_err(|e| StorageError::Open(e.to_string()))?;

        debug!(path = %path.as_ref().display(), "opened redb database");
        Ok(Self { db })
    }
}

impl KeyValueBackend for RedbBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Backend(e.to_string()))?;
        {
            let mut table =
                txn.open_table(DATA_TABLE).map_err(|e| StorageError::Backend(e.to_string()))?;
            table.insert(key, value).map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Backend(e.to_string()))?;

        let table = match txn.open_table(DATA_TABLE) {
            Ok(table) => table,
            // an empty database has no data table yet, which is not an error
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StorageError::Backend(e.to_string())),
        };

        let value = table.get(key).map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> StorageResult<()> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Backend(e.to_string()))?;
        {
            let mut table =
                txn.open_table(DATA_TABLE).map_err(|e| StorageError::Backend(e.to_string()))?;

            for op in ops {
                match op {
                    BatchOp::Put { key, value } => {
                        table
                            .insert(key.as_slice(), value.as_slice())
                            .map_err(|e| StorageError::Backend(e.to_string()))?;
                    }
                    BatchOp::Delete { key } => {
                        table
                            .remove(key.as_slice())
                            .map_err(|e| StorageError::Backend(e.to_string()))?;
                    }
                }
            }
        }
        txn.commit().map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn close(&self) -> StorageResult<()> {
        // commits are already durable; dropping the handle releases the file
        debug!("closing redb database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_a_fresh_database_is_absent() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let backend = RedbBackend::open(dir.path().join("db.redb")).expect("open failed");

        assert_eq!(backend.get(b"missing").expect("get failed"), None);
    }

    #[test]
    fn batch_applies_in_insertion_order() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let backend = RedbBackend::open(dir.path().join("db.redb")).expect("open failed");

        backend
            .write_batch(vec![
                BatchOp::Put { key: b"k".to_vec(), value: b"old".to_vec() },
                BatchOp::Put { key: b"k".to_vec(), value: b"new".to_vec() },
            ])
            .expect("batch failed");

        assert_eq!(backend.get(b"k").expect("get failed"), Some(b"new".to_vec()));
    }
}
