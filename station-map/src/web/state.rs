//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use crate::config::AppConfig;
use crate::map::MarkerBoard;
use crate::pipeline::{
    IngestError, IngestReport, RefreshError, RefreshReport, refresh_view, store_rows,
};
use crate::store::JsonRecordStore;
use crate::wikidata::{RowSource, StationSource};

/// Shared application state.
///
/// Locks are always taken in the order store, terms, board.
#[derive(Clone)]
pub struct AppState {
    /// Where station rows come from
    pub source: Arc<StationSource>,

    /// Persisted raw records
    pub store: Arc<Mutex<JsonRecordStore>>,

    /// Markers currently on the map
    pub board: Arc<RwLock<MarkerBoard>>,

    /// Active search terms
    pub terms: Arc<RwLock<Vec<String>>>,

    /// Server configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new app state with an empty map and no search terms.
    pub fn new(source: StationSource, store: JsonRecordStore, config: AppConfig) -> Self {
        Self {
            source: Arc::new(source),
            store: Arc::new(Mutex::new(store)),
            board: Arc::new(RwLock::new(MarkerBoard::new())),
            terms: Arc::new(RwLock::new(Vec::new())),
            config: Arc::new(config),
        }
    }

    /// Fetch fresh rows, replace the stored records and redraw the map with
    /// the active search terms.
    ///
    /// The fetch runs before any lock is taken. If it fails, neither the
    /// store nor the map changes.
    pub async fn ingest(&self) -> Result<(IngestReport, RefreshReport), IngestError> {
        let rows = self.source.fetch_rows().await?;

        let mut store = self.store.lock().await;
        let ingest = store_rows(&rows, &mut *store)?;

        let terms = self.terms.read().await;
        let mut board = self.board.write().await;
        let view = match refresh_view(&*store, &mut *board, &terms) {
            Ok(view) => view,
            Err(RefreshError::Store(e)) => return Err(IngestError::Store(e)),
            // Active terms were validated when they were set
            Err(RefreshError::Filter(e)) => {
                warn!(error = %e, "active search terms no longer compile");
                RefreshReport::default()
            }
        };

        Ok((ingest, view))
    }

    /// Redraw the map for new search terms and make them the active ones.
    ///
    /// Invalid terms leave both the map and the active terms unchanged.
    pub async fn search(&self, terms: Vec<String>) -> Result<RefreshReport, RefreshError> {
        let store = self.store.lock().await;
        let mut active = self.terms.write().await;
        let mut board = self.board.write().await;

        let view = refresh_view(&*store, &mut *board, &terms)?;
        *active = terms;
        Ok(view)
    }
}
