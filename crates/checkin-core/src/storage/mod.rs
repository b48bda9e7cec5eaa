mod config;
pub mod database;
pub mod gateway;

pub use config::{Config, EventConfig, NotificationsConfig, StorageConfig};
pub use database::Database;
pub use gateway::{PersistedState, PersistenceGateway};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Opaque string key-value store backing the persistence gateway.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Returns `~/.config/checkin-desk[-dev]/` based on CHECKIN_ENV.
///
/// Set CHECKIN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHECKIN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("checkin-desk-dev")
    } else {
        base_dir.join("checkin-desk")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
