//! Persistent storage for raw station records.
//!
//! The store holds the last ingested [`RawRecord`]s exactly as converted;
//! aggregated stations are never persisted. Stores enforce record identity
//! (every field except the address) and reject duplicate inserts.

mod error;
mod json;
mod memory;

pub use error::StoreError;
pub use json::{JsonRecordStore, StoreConfig};
pub use memory::MemoryRecordStore;

use crate::domain::RawRecord;

/// Replace-all / select-all storage for raw records.
pub trait RecordStore {
    /// Remove every stored record.
    fn clear_all(&mut self) -> Result<(), StoreError>;

    /// Store one record. Fails without side effects if the record is a
    /// duplicate of one already stored.
    fn insert(&mut self, record: &RawRecord) -> Result<(), StoreError>;

    /// Every stored record, in insertion order.
    fn select_all(&self) -> Result<Vec<RawRecord>, StoreError>;

    /// Make pending changes durable.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
