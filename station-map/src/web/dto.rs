//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::map::Marker;
use crate::pipeline::{IngestReport, RefreshReport};

/// Request to filter the map.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Raw search-box text; terms are separated by the configured delimiter
    #[serde(default)]
    pub q: String,
}

/// A marker on the map.
#[derive(Debug, Serialize)]
pub struct MarkerResult {
    /// Surface-assigned marker ID
    pub id: u64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Popup text
    pub label: String,
}

impl From<&Marker> for MarkerResult {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id.0,
            latitude: marker.position.latitude(),
            longitude: marker.position.longitude(),
            label: marker.label.clone(),
        }
    }
}

/// Response listing the current markers.
#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    /// Active search terms
    pub terms: Vec<String>,

    /// Displayed markers
    pub markers: Vec<MarkerResult>,
}

/// Response to a search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Terms parsed from the request
    pub terms: Vec<String>,

    /// What changed on the map
    pub view: RefreshReport,
}

/// Response to a manual ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Ingest summary, including skipped rows
    pub ingest: IngestReport,

    /// What changed on the map
    pub view: RefreshReport,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
