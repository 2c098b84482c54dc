//! Session-scoped key/value storage
//!
//! The cache only needs a string key/value store whose lifetime is a single
//! session. Backends implement [`SessionStorage`].

use super::sqlite::{SqliteStorage, SqliteStorageConfig};
use crate::config::{CacheSettings, StorageKind};
use crate::{BlogError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// String key/value storage scoped to one session
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key` (no-op if absent)
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-process storage; the session ends when the value is dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    /// Maximum total bytes (keys + values), if bounded
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once `bytes` would be exceeded
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| BlogError::Storage(format!("Session storage lock poisoned: {}", e)))
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.lock()?;

        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(BlogError::Storage(format!(
                    "Session storage quota exceeded ({} bytes)",
                    quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Open the storage backend selected in configuration
pub fn open_storage(settings: &CacheSettings, session_id: &str) -> Result<Arc<dyn SessionStorage>> {
    match settings.storage {
        StorageKind::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageKind::Sqlite => Ok(Arc::new(SqliteStorage::open(
            SqliteStorageConfig::new(&settings.path, session_id).with_max_age(settings.ttl()),
        )?)),
    }
}
