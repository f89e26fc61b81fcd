//! Reconciliation, filtering and marker diffing.
//!
//! Everything in here is a synchronous, pure transformation over in-memory
//! collections. I/O lives in the `wikidata`, `store` and `web` modules.

mod filter;
mod markers;
mod reconcile;

pub use filter::{FilterError, filter};
pub use markers::{MarkerDiff, apply_diff, diff_markers};
pub use reconcile::reconcile;
