//! File-backed storage backend.
//!
//! Each key is stored as `<data_dir>/<key>.json`. Writes go to a temporary
//! sibling first and are renamed into place, so a crash mid-write never
//! leaves a truncated record behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LocalStorage, StorageReadError, StorageWriteError, check_quota, record_size};

const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Directory-backed storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    /// Limit the total size of all keys and values.
    #[must_use]
    pub const fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// The directory records are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `key`.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced so a key can never
    /// escape the data directory.
    #[must_use]
    pub fn record_path(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_stem}.{RECORD_EXTENSION}"))
    }

    /// Bytes used by every record except the one at `exclude`.
    fn usage_excluding(&self, exclude: &Path) -> u64 {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return 0;
        };
        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.as_path() != exclude
                    && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
            })
            .map(|path| {
                let key_len = path
                    .file_stem()
                    .map_or(0, |stem| stem.to_string_lossy().len());
                let value_len = fs::metadata(&path).map_or(0, |meta| meta.len());
                u64::try_from(key_len)
                    .unwrap_or(u64::MAX)
                    .saturating_add(value_len)
            })
            .sum()
    }

    fn write_atomically(&self, path: &Path, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp_path = path.with_extension(TEMP_EXTENSION);
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageReadError> {
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageReadError {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageWriteError> {
        let path = self.record_path(key);
        if self.quota_bytes.is_some() {
            let needed = self
                .usage_excluding(&path)
                .saturating_add(record_size(key, value));
            check_quota(self.quota_bytes, needed)?;
        }

        self.write_atomically(&path, value)
            .map_err(|source| StorageWriteError::Io {
                key: key.to_string(),
                source,
            })?;
        debug!(key = %key, bytes = value.len(), path = %path.display(), "Record written");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageWriteError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageWriteError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
