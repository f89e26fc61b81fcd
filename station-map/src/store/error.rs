//! Record store error types.

/// Errors that can occur when reading or writing the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with the same identity is already stored
    #[error("duplicate record for station {station_id} ({name})")]
    Duplicate { station_id: String, name: String },

    /// Reading or writing the store file failed
    #[error("store I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be (de)serialized
    #[error("store serialization error: {message}")]
    Serialization { message: String },
}
