//! JSON file record store.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::MemoryRecordStore;
use super::{RecordStore, StoreError};
use crate::domain::RawRecord;

/// Stored records with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecords {
    /// Unix timestamp when the file was written.
    saved_at_secs: u64,
    /// The stored records, in insertion order.
    records: Vec<RawRecord>,
}

/// Configuration for the JSON record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the store file.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Create a new store config with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("stations.json")
    }
}

/// Record store persisted as a single JSON file.
///
/// Records are held in memory and written out on [`flush`](RecordStore::flush),
/// via a temporary file and a rename so readers never see a half-written
/// store.
#[derive(Debug)]
pub struct JsonRecordStore {
    config: StoreConfig,
    records: MemoryRecordStore,
    dirty: bool,
}

impl JsonRecordStore {
    /// Open the store, loading existing records if the file exists.
    ///
    /// A file holding an invalid record (blank name or identifier) or two
    /// records with the same identity is rejected rather than loaded partly.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let records = match std::fs::read_to_string(&config.path) {
            Ok(contents) => {
                let stored: StoredRecords =
                    serde_json::from_str(&contents).map_err(|e| StoreError::Serialization {
                        message: format!("failed to parse {}: {}", config.path.display(), e),
                    })?;
                MemoryRecordStore::with_records(stored.records)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryRecordStore::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: config.path.display().to_string(),
                    source,
                });
            }
        };

        debug!(path = %config.path.display(), records = records.len(), "opened record store");

        Ok(Self {
            config,
            records,
            dirty: false,
        })
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.config.path.display().to_string(),
            source,
        }
    }
}

impl RecordStore for JsonRecordStore {
    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.records.clear_all()?;
        self.dirty = true;
        Ok(())
    }

    fn insert(&mut self, record: &RawRecord) -> Result<(), StoreError> {
        self.records.insert(record)?;
        self.dirty = true;
        Ok(())
    }

    fn select_all(&self) -> Result<Vec<RawRecord>, StoreError> {
        self.records.select_all()
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let saved_at_secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let stored = StoredRecords {
            saved_at_secs,
            records: self.records.records().to_vec(),
        };

        // Create parent directories if needed
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&stored).map_err(|e| StoreError::Serialization {
            message: format!("failed to serialize store: {}", e),
        })?;

        let tmp = self.config.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.config.path).map_err(|e| self.io_error(e))?;

        self.dirty = false;
        debug!(path = %self.config.path.display(), records = stored.records.len(), "flushed record store");
        Ok(())
    }
}
