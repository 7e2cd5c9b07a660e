//! Key/value persistence substrate
//!
//! The history store only needs to read and write a single named string.
//! Backends:
//! - [`SqliteStore`]: durable, one row per key inside a namespace
//! - [`MemoryStore`]: process-local, used for tests and `--ephemeral` sessions

pub mod sqlite;

use std::collections::HashMap;
use thiserror::Error;

pub use sqlite::SqliteStore;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key/value store
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when it was never written
    fn read_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn write_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read_string(key)
    }

    fn write_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write_string(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.read_string("orderHistory").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.write_string("orderHistory", "1,0").unwrap();
        store.write_string("orderHistory", "").unwrap();
        assert_eq!(store.read_string("orderHistory").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.write_string("k", "v").unwrap();
        assert_eq!(store.read_string("k").unwrap().as_deref(), Some("v"));
    }
}
