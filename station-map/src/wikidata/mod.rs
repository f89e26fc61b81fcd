//! Wikidata fetch adapter.
//!
//! Runs the station SPARQL query against the Wikidata Query Service (or a
//! saved response on disk) and turns the result bindings into validated
//! [`RawRecord`](crate::domain::RawRecord)s.
//!
//! Wikidata returns one binding per combination of multi-valued properties,
//! so a station with two connecting lines arrives as two rows with the same
//! label. Merging them is the reconciliation engine's job, not this one's.

mod client;
mod convert;
mod error;
mod query;
mod source;
mod types;

pub use client::{DEFAULT_ENDPOINT, WikidataClient, WikidataConfig, parse_response};
pub use convert::{ConversionError, convert_row};
pub use error::FetchError;
pub use query::{DEFAULT_QUERY, load_query};
pub use source::{RowSource, StaticRowSource, StationSource};
pub use types::{RawRow, SparqlHead, SparqlResponse, SparqlResults, SparqlValue};
