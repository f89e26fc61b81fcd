//! End-to-end operations: ingest rows into the store, refresh the map.
//!
//! Collaborators (row source, record store, marker surface) are passed in
//! explicitly; nothing here holds global state.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::RawRecord;
use crate::engine::{FilterError, apply_diff, diff_markers, filter, reconcile};
use crate::map::MarkerSurface;
use crate::store::{RecordStore, StoreError};
use crate::wikidata::{FetchError, RawRow, RowSource, convert_row};

/// Errors that abort an ingest.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The upstream fetch failed; the store was not touched
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Clearing or flushing the store failed
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors that abort a view refresh. The marker surface is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("failed to read records: {0}")]
    Store(#[from] StoreError),
}

/// Where in the ingest a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    /// The row could not be converted into a record
    Conversion,
    /// The store refused the record
    Insert,
}

/// A row that was skipped during ingest, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub stage: SkipStage,
    pub station_id: Option<String>,
    pub name: Option<String>,
    pub reason: String,
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    /// Rows returned by the source
    pub fetched: usize,
    /// Records written to the store
    pub stored: usize,
    /// Rows dropped along the way
    pub skipped: Vec<SkippedRecord>,
}

/// Outcome of a view refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Records left after filtering (with per-term repeats)
    pub records: usize,
    /// Aggregated stations in the view
    pub stations: usize,
    /// Markers added
    pub added: usize,
    /// Markers removed
    pub removed: usize,
}

/// Fetch every row from `source` and replace the store's contents with them.
///
/// The store is cleared only once the fetch has succeeded, so a failed
/// fetch leaves previously stored records in place.
pub async fn ingest_and_store<R, S>(
    source: &R,
    store: &mut S,
) -> Result<IngestReport, IngestError>
where
    R: RowSource + ?Sized,
    S: RecordStore + ?Sized,
{
    let rows = source.fetch_rows().await?;
    store_rows(&rows, store)
}

/// Convert `rows` and replace the store's contents with the resulting records.
///
/// Rows that fail conversion and records the store rejects are skipped and
/// reported; the rest of the ingest carries on. If the new contents cannot be
/// flushed, the previous records are put back before the error is returned.
pub fn store_rows<S>(rows: &[RawRow], store: &mut S) -> Result<IngestReport, IngestError>
where
    S: RecordStore + ?Sized,
{
    let mut report = IngestReport {
        fetched: rows.len(),
        ..IngestReport::default()
    };

    let mut records: Vec<RawRecord> = Vec::with_capacity(rows.len());
    for row in rows {
        match convert_row(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(station = ?row.get("station"), error = %e, "skipping unconvertible row");
                report.skipped.push(SkippedRecord {
                    stage: SkipStage::Conversion,
                    station_id: row.get("station").map(str::to_string),
                    name: row.get("stationLabel").map(str::to_string),
                    reason: e.to_string(),
                });
            }
        }
    }

    let previous = store.select_all()?;
    store.clear_all()?;
    for record in &records {
        match store.insert(record) {
            Ok(()) => report.stored += 1,
            Err(e) => {
                warn!(
                    station = %record.station_id,
                    name = %record.name,
                    error = %e,
                    "skipping record"
                );
                report.skipped.push(SkippedRecord {
                    stage: SkipStage::Insert,
                    station_id: Some(record.station_id.clone()),
                    name: Some(record.name.clone()),
                    reason: e.to_string(),
                });
            }
        }
    }
    if let Err(e) = store.flush() {
        restore(store, &previous);
        return Err(e.into());
    }

    info!(
        fetched = report.fetched,
        stored = report.stored,
        skipped = report.skipped.len(),
        "ingested station records"
    );

    Ok(report)
}

/// Put `records` back after a failed flush.
fn restore<S>(store: &mut S, records: &[RawRecord])
where
    S: RecordStore + ?Sized,
{
    if let Err(e) = store.clear_all() {
        warn!(error = %e, "failed to clear store while restoring previous records");
        return;
    }
    for record in records {
        if let Err(e) = store.insert(record) {
            warn!(station = %record.station_id, error = %e, "failed to restore record");
        }
    }
    warn!(records = records.len(), "restored previous records after failed flush");
}

/// Rebuild the view from the store and bring `surface` in line with it.
///
/// Runs select-all, filter, reconcile and marker diff. A bad search term or
/// store read failure is returned before the surface is changed.
pub fn refresh_view<S, M>(
    store: &S,
    surface: &mut M,
    terms: &[String],
) -> Result<RefreshReport, RefreshError>
where
    S: RecordStore + ?Sized,
    M: MarkerSurface + ?Sized,
{
    let records = store.select_all()?;
    let matched = filter(&records, terms)?;
    let stations = reconcile(&matched);

    let current = surface.markers();
    let diff = diff_markers(&current, &stations);
    let (added, removed) = apply_diff(surface, &diff);

    info!(
        terms = terms.len(),
        records = matched.len(),
        stations = stations.len(),
        added,
        removed,
        "refreshed map view"
    );

    Ok(RefreshReport {
        records: matched.len(),
        stations: stations.len(),
        added,
        removed,
    })
}
