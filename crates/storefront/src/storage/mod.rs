//! Durable local key-value storage.
//!
//! The cart is persisted as a single string record under a fixed key, the
//! same way a browser keeps it in origin-scoped local storage. Reads and
//! writes are synchronous and attempted exactly once.
//!
//! # Backends
//!
//! - [`FileStorage`] - One file per key inside a data directory
//! - [`MemoryStorage`] - Process-local map, for tests and ephemeral sessions
//!
//! Both backends can enforce a byte quota over all stored keys and values;
//! exceeding it is reported as [`StorageWriteError::QuotaExceeded`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// A stored record could not be read.
#[derive(Debug, Error)]
#[error("failed to read '{key}' from storage: {source}")]
pub struct StorageReadError {
    pub key: String,
    #[source]
    pub source: std::io::Error,
}

/// A record could not be written or removed.
#[derive(Debug, Error)]
pub enum StorageWriteError {
    /// Writing the record would exceed the configured quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: u64, quota: u64 },

    /// The backing medium rejected the write.
    #[error("failed to write '{key}' to storage: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// String-keyed durable storage.
pub trait LocalStorage {
    /// Read a record. A missing key is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageReadError` if the record exists but cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageReadError>;

    /// Create or replace a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageWriteError` if the write fails or exceeds the quota.
    /// A failed write leaves any previous value in place.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageWriteError>;

    /// Delete a record. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageWriteError` if the backing medium rejects the removal.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageWriteError>;
}

/// Bytes a record occupies for quota accounting.
fn record_size(key: &str, value: &str) -> u64 {
    u64::try_from(key.len() + value.len()).unwrap_or(u64::MAX)
}

/// Check a prospective write against an optional quota.
fn check_quota(quota: Option<u64>, needed: u64) -> Result<(), StorageWriteError> {
    match quota {
        Some(quota) if needed > quota => Err(StorageWriteError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_quota() {
        assert!(check_quota(None, u64::MAX).is_ok());
        assert!(check_quota(Some(10), 10).is_ok());
        let err = check_quota(Some(10), 11).unwrap_err();
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: 11 bytes needed, 10 allowed"
        );
    }

    #[test]
    fn test_record_size_counts_key_and_value() {
        assert_eq!(record_size("cart", "[]"), 6);
    }
}
