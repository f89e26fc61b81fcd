//! Domain types for the station map.
//!
//! Raw station rows, the aggregated per-name station entity, and the
//! geographic position used to identify markers. Values are validated at
//! construction time so downstream code can trust them.

mod error;
mod label;
mod position;
mod record;
mod station;

pub use error::DomainError;
pub use label::normalize;
pub use position::Position;
pub use record::{RawRecord, StoreKey};
pub use station::AggregatedStation;
