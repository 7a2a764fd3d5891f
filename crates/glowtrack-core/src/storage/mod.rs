mod config;
pub mod database;
pub mod memory;

pub use config::{Config, RoutineConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::StorageError;

/// Keys used in the single key-value namespace.
pub struct StorageKeys;

impl StorageKeys {
    pub const ROUTINE_DATA: &'static str = "routineData";
    pub const USER_DATA: &'static str = "userData";
    pub const USER_REPORTS: &'static str = "userReports";
    /// Legacy flag; nothing in this crate reads or writes it.
    pub const REPORT_METRICS: &'static str = "reportMetrics";
}

/// Asynchronous string key-value persistence.
///
/// `get` returns `Ok(None)` for an absent key. Stores built on top of this
/// decide on their own whether a read failure is fatal; a write failure is
/// always reported.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<T: KeyValueStore> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/glowtrack[-dev]/` based on GLOWTRACK_ENV.
///
/// Set GLOWTRACK_ENV=dev to use development data directory. Set
/// GLOWTRACK_DATA_DIR to bypass the lookup entirely.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("GLOWTRACK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GLOWTRACK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("glowtrack-dev")
            } else {
                base_dir.join("glowtrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
