//! Free-text filtering of raw records.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::domain::RawRecord;

/// Error raised for a search term that is not a valid regular expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid search term '{term}': {reason}")]
    InvalidTerm { term: String, reason: String },
}

/// Select the records matching any of the given search terms.
///
/// Each term is lower-cased and matched as a case-insensitive regular
/// expression against the name, station type, connecting line, transport
/// network and ISO opening date of every record. Absent fields never match.
///
/// Results are grouped by term: a record matching several terms appears
/// once for each of them. With no terms the input is returned unchanged.
///
/// All terms are compiled before any record is examined, so an invalid
/// term fails the whole call.
pub fn filter(records: &[RawRecord], terms: &[String]) -> Result<Vec<RawRecord>, FilterError> {
    if terms.is_empty() {
        return Ok(records.to_vec());
    }

    let patterns = terms
        .iter()
        .map(|term| compile(term))
        .collect::<Result<Vec<_>, _>>()?;

    let mut matched = Vec::new();
    for pattern in &patterns {
        matched.extend(records.iter().filter(|r| matches(pattern, r)).cloned());
    }

    debug!(
        terms = terms.len(),
        records = records.len(),
        matched = matched.len(),
        "filtered station records"
    );

    Ok(matched)
}

fn compile(term: &str) -> Result<Regex, FilterError> {
    let lowered = term.to_lowercase();
    RegexBuilder::new(&lowered)
        .case_insensitive(true)
        .build()
        .map_err(|e| FilterError::InvalidTerm {
            term: term.to_string(),
            reason: e.to_string(),
        })
}

fn matches(pattern: &Regex, record: &RawRecord) -> bool {
    let date = record.opening_date.map(|d| d.format("%Y-%m-%d").to_string());

    [
        Some(record.name.as_str()),
        record.station_type.as_deref(),
        record.connecting_line.as_deref(),
        record.transport_network.as_deref(),
        date.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| pattern.is_match(field))
}
