//! SQLite-backed preferences storage

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// SQLite preferences store.
///
/// Values live in a single `preferences` table keyed by `(namespace, key)`,
/// so several named preference sets can share one database file.
pub struct SqliteStore {
    conn: Connection,
    namespace: String,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Self, StorageError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        Self::init_schema(&conn)?;

        debug!("Opened preferences database at {}", path.display());
        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory(namespace: &str) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            );
        "#,
        )?;
        Ok(())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl KeyValueStore for SqliteStore {
    fn read_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            r#"INSERT INTO preferences (namespace, key, value) VALUES (?1, ?2, ?3)
               ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value"#,
            params![self.namespace, key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("tracker.db");

        {
            let mut store = SqliteStore::open(&db_path, "DoordashTrackerPrefs").unwrap();
            store.write_string("orderHistory", "1,0,1").unwrap();
        }

        let store = SqliteStore::open(&db_path, "DoordashTrackerPrefs").unwrap();
        assert_eq!(
            store.read_string("orderHistory").unwrap().as_deref(),
            Some("1,0,1")
        );
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = SqliteStore::open_in_memory("prefs").unwrap();
        assert_eq!(store.read_string("orderHistory").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let mut store = SqliteStore::open_in_memory("prefs").unwrap();
        store.write_string("orderHistory", "1,1").unwrap();
        store.write_string("orderHistory", "").unwrap();
        assert_eq!(store.read_string("orderHistory").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tracker.db");

        let mut first = SqliteStore::open(&db_path, "first").unwrap();
        first.write_string("orderHistory", "1").unwrap();
        drop(first);

        let second = SqliteStore::open(&db_path, "second").unwrap();
        assert_eq!(second.read_string("orderHistory").unwrap(), None);
        assert_eq!(second.namespace(), "second");
    }
}
