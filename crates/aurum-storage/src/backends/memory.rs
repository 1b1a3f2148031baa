//! In-memory storage backend.
//!
//! Keeps the whole keyspace in a `BTreeMap` behind a read-write lock. There
//! is nothing to sync, so the durability contract holds trivially; this
//! backend exists for tests and tooling, not for node deployments.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::engine::{BatchOp, KeyValueBackend, StorageError, StorageResult};
use crate::factory::BackendOptions;
use crate::store::KeyValueStore;

/// Registry name for this backend.
pub const BACKEND_NAME: &str = "memory";

/// Construct an in-memory [`KeyValueStore`].
///
/// The location options are ignored; the keyspace lives on the heap and is
/// gone when the store is dropped.
pub fn factory(_options: &BackendOptions) -> StorageResult<KeyValueStore> {
    Ok(KeyValueStore::new(Box::new(MemoryBackend::new())))
}

/// Key-value backend over an in-process ordered map.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let mut entries =
            self.entries.write().map_err(|_| StorageError::Backend("lock poisoned".into()))?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let entries =
            self.entries.read().map_err(|_| StorageError::Backend("lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> StorageResult<()> {
        // one lock acquisition makes the whole batch atomic to readers
        let mut entries =
            self.entries.write().map_err(|_| StorageError::Backend("lock poisoned".into()))?;

        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    entries.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_batch() {
        let backend = MemoryBackend::new();

        backend.set(b"a", b"1").expect("set failed");
        assert_eq!(backend.get(b"a").expect("get failed"), Some(b"1".to_vec()));
        assert_eq!(backend.get(b"b").expect("get failed"), None);

        backend
            .write_batch(vec![
                BatchOp::Put { key: b"b".to_vec(), value: b"2".to_vec() },
                BatchOp::Delete { key: b"a".to_vec() },
            ])
            .expect("batch failed");

        assert_eq!(backend.get(b"a").expect("get failed"), None);
        assert_eq!(backend.get(b"b").expect("get failed"), Some(b"2".to_vec()));
    }
}
