//! SQLite-backed key-value storage.
//!
//! Holds every persisted record of the app in a single `kv` table:
//! - `routineData`: the routine, completions and streak
//! - `userData`: the onboarding profile
//! - `userReports`: the report history

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use super::{data_dir, Config, KeyValueStore};
use crate::error::StorageError;

/// SQLite database holding the app's key-value namespace.
///
/// Cloning shares the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open the database file named by the config inside the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        let dir = data_dir().map_err(StorageError::DataDir)?;
        Self::open_at(&dir.join(&config.storage.database_file))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn, path)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: Path::new(":memory:").to_path_buf(),
            source,
        })?;
        Self::from_connection(conn, Path::new(":memory:"))
    }

    fn from_connection(conn: Connection, path: &Path) -> Result<Self, StorageError> {
        migrate(&conn).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get a value from the kv store, blocking the current thread.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        kv_get(&conn, key).map_err(|e| StorageError::read(key, e))
    }

    /// Set a value in the kv store, blocking the current thread.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        kv_set(&conn, key, value).map_err(|e| StorageError::write(key, e))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Worker("connection mutex poisoned".to_string()))
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}

fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
    match result {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

fn kv_set(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let db = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || db.kv_get(&key)).await?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let db = self.clone();
        let key = key.to_string();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || db.kv_set(&key, &value)).await?
    }
}
