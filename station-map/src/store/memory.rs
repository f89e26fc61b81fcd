//! In-memory record store.

use std::collections::HashSet;

use super::{RecordStore, StoreError};
use crate::domain::{RawRecord, StoreKey};

/// Record store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<RawRecord>,
    keys: HashSet<StoreKey>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    ///
    /// Fails on the first record that duplicates an earlier one.
    pub fn with_records(
        records: impl IntoIterator<Item = RawRecord>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.insert(&record)?;
        }
        Ok(store)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(super) fn records(&self) -> &[RawRecord] {
        &self.records
    }
}

impl RecordStore for MemoryRecordStore {
    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.keys.clear();
        Ok(())
    }

    fn insert(&mut self, record: &RawRecord) -> Result<(), StoreError> {
        if !self.keys.insert(record.store_key()) {
            return Err(StoreError::Duplicate {
                station_id: record.station_id.clone(),
                name: record.name.clone(),
            });
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn select_all(&self) -> Result<Vec<RawRecord>, StoreError> {
        Ok(self.records.clone())
    }
}
