//! Key/value backends the favorites blob is persisted in.

use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database Error: {0}")]
    DatabaseError(String),
    #[error("Storage is read-only")]
    ReadOnly,
    #[error("Other Error: {0}")]
    Other(String),
}

/// Minimal string-to-string store, the shape of browser local storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn apply_migrations(conn: &mut Connection) -> Result<(), StorageError> {
    let migrations = Migrations::new(vec![
        M::up(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);\
             INSERT INTO schema_version (version) VALUES (1);\
             CREATE TABLE IF NOT EXISTS kv (\
                 key TEXT PRIMARY KEY,\
                 value TEXT NOT NULL\
             );",
        ),
    ]);
    migrations
        .to_latest(conn)
        .map_err(|e| StorageError::DatabaseError(format!("Failed to apply migrations: {}", e)))?;
    Ok(())
}

/// SQLite file holding a single `kv` table.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::DatabaseError(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::DatabaseError(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StorageError> {
        apply_migrations(&mut conn)?;
        Ok(SqliteStorage {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Other("Poisoned lock".into()))
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock_conn()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| StorageError::DatabaseError(format!("Failed to read key {}: {}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| StorageError::DatabaseError(format!("Failed to write key {}: {}", key, e)))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| {
                StorageError::DatabaseError(format!("Failed to remove key {}: {}", key, e))
            })?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions. Clones share data.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, reads still work.
    pub fn read_only() -> Self {
        MemoryStorage {
            entries: Arc::default(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing the read-only flag.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Other("Poisoned lock".into()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        self.lock()?.remove(key);
        Ok(())
    }
}
