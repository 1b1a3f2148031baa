//! Backend resolution from named configuration.
//!
//! A [`StorageFactory`] maps backend names to constructor functions. Callers
//! hand it a name and a [`BackendOptions`] map and get back a ready
//! [`KeyValueStore`], staying agnostic of which engine serves it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::backends;
use crate::engine::{StorageError, StorageResult};
use crate::store::KeyValueStore;

/// The backend opened when a deployment does not choose one.
pub const DEFAULT_BACKEND: &str = backends::sled::BACKEND_NAME;

/// Required option naming the filesystem location for backend data.
pub const PATH_KEY: &str = "path";

/// Constructor signature every registered backend provides.
pub type BackendConstructor = fn(&BackendOptions) -> StorageResult<KeyValueStore>;

/// Configuration map handed to a backend constructor.
///
/// Options are dynamically typed; constructors pull out the keys they
/// understand through the typed accessors and ignore the rest. The only
/// option the generic contract requires is [`PATH_KEY`]; tuning keys such as
/// cache sizes are backend-specific.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    options: BTreeMap<String, Value>,
}

impl BackendOptions {
    /// An empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only the storage location set.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let mut options = Self::new();
        options.set(PATH_KEY, Value::String(path.into().to_string_lossy().into_owned()));
        options
    }

    /// Insert or replace an option.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.options.insert(key.into(), value);
        self
    }

    /// The required storage location.
    ///
    /// # Errors
    ///
    /// [`StorageError::MissingOption`] when the option is absent,
    /// [`StorageError::InvalidOption`] when it is not a string.
    pub fn require_path(&self) -> StorageResult<PathBuf> {
        match self.options.get(PATH_KEY) {
            None => Err(StorageError::MissingOption(PATH_KEY)),
            Some(Value::String(path)) => Ok(PathBuf::from(path)),
            Some(_) => Err(StorageError::InvalidOption {
                key: PATH_KEY.to_string(),
                expected: "string",
            }),
        }
    }

    /// An optional unsigned integer option; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// [`StorageError::InvalidOption`] when the option is present but not an
    /// unsigned integer.
    pub fn get_u64(&self, key: &str) -> StorageResult<Option<u64>> {
        let invalid = || StorageError::InvalidOption {
            key: key.to_string(),
            expected: "unsigned integer",
        };

        match self.options.get(key) {
            None => Ok(None),
            Some(Value::Number(number)) => number.as_u64().map(Some).ok_or_else(invalid),
            Some(_) => Err(invalid()),
        }
    }
}

/// Registry resolving a backend name and options into an open store.
///
/// `StorageFactory::default()` carries every built-in backend; `new` starts
/// empty for deployments that register their own engines.
pub struct StorageFactory {
    backends: BTreeMap<&'static str, BackendConstructor>,
}

impl StorageFactory {
    /// An empty registry.
    pub fn new() -> Self {
        Self { backends: BTreeMap::new() }
    }

    /// Register (or replace) a constructor under `name`.
    pub fn register(&mut self, name: &'static str, constructor: BackendConstructor) {
        self.backends.insert(name, constructor);
    }

    /// The names of all registered backends, in sorted order.
    pub fn backend_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.keys().copied()
    }

    /// Resolve `name` and open a store with the given options.
    ///
    /// # Errors
    ///
    /// [`StorageError::UnknownBackend`] when no constructor is registered
    /// under `name`; otherwise whatever the constructor reports: a config
    /// error for a bad option map, or [`StorageError::Open`] when the engine
    /// fails to open (for example because another process holds the path's
    /// lock).
    pub fn open(&self, name: &str, options: &BackendOptions) -> StorageResult<KeyValueStore> {
        let constructor = self
            .backends
            .get(name)
            .ok_or_else(|| StorageError::UnknownBackend(name.to_string()))?;

        let store = constructor(options)?;
        info!(backend = name, "storage backend ready");
        Ok(store)
    }
}

impl Default for StorageFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register(backends::sled::BACKEND_NAME, backends::sled::factory);
        factory.register(backends::redb::BACKEND_NAME, backends::redb::factory);
        factory.register(backends::memory::BACKEND_NAME, backends::memory::factory);
        factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_path_sets_the_required_option() {
        let options = BackendOptions::with_path("/tmp/chain");
        assert_eq!(options.require_path().expect("path missing"), PathBuf::from("/tmp/chain"));
    }

    #[test]
    fn missing_path_is_a_config_error() {
        let err = BackendOptions::new().require_path().unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, StorageError::MissingOption(PATH_KEY)));
    }

    #[test]
    fn non_string_path_is_a_config_error() {
        let mut options = BackendOptions::new();
        options.set(PATH_KEY, Value::from(42));

        let err = options.require_path().unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, StorageError::InvalidOption { .. }));
    }

    #[test]
    fn get_u64_accepts_absence_and_rejects_bad_types() {
        let mut options = BackendOptions::new();
        assert_eq!(options.get_u64("cache-capacity").expect("absent is fine"), None);

        options.set("cache-capacity", Value::from(512u64));
        assert_eq!(options.get_u64("cache-capacity").expect("number is fine"), Some(512));

        options.set("cache-capacity", Value::String("lots".into()));
        assert!(options.get_u64("cache-capacity").unwrap_err().is_config());

        options.set("cache-capacity", Value::from(-3));
        assert!(options.get_u64("cache-capacity").unwrap_err().is_config());
    }

    #[test]
    fn default_registry_knows_the_builtin_backends() {
        let factory = StorageFactory::default();
        let names: Vec<_> = factory.backend_names().collect();

        assert!(names.contains(&DEFAULT_BACKEND));
        assert!(names.contains(&"redb"));
        assert!(names.contains(&"memory"));
    }

    #[test]
    fn unknown_backend_is_rejected_by_name() {
        let factory = StorageFactory::default();
        let err = factory.open("leveldb", &BackendOptions::new()).unwrap_err();

        assert!(matches!(err, StorageError::UnknownBackend(name) if name == "leveldb"));
    }
}
