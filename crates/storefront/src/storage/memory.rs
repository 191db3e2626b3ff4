//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{LocalStorage, StorageReadError, StorageWriteError, check_quota, record_size};

/// Map-backed storage.
///
/// Clones share the same records, so a test can keep a handle to inspect or
/// tamper with what a cart store has written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<u64>,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of all keys and values.
    #[must_use]
    pub const fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageReadError> {
        Ok(self.records().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageWriteError> {
        let mut records = self.records();
        let others: u64 = records
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| record_size(k, v))
            .sum();
        check_quota(
            self.quota_bytes,
            others.saturating_add(record_size(key, value)),
        )?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageWriteError> {
        self.records().remove(key);
        Ok(())
    }
}
