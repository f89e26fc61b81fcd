//! Row sources: where station rows come from.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::client::{WikidataClient, parse_response};
use super::error::FetchError;
use super::types::RawRow;

/// Something that can produce the full set of upstream station rows.
///
/// A fetch is atomic: it yields every row or fails.
pub trait RowSource {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send;
}

impl RowSource for WikidataClient {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send {
        self.fetch_all()
    }
}

/// Row source that serves a saved SPARQL JSON response from disk.
///
/// Useful for development without hitting the public endpoint. The file is
/// re-read on every fetch so edits show up on the next ingest.
#[derive(Debug, Clone)]
pub struct StaticRowSource {
    path: PathBuf,
}

impl StaticRowSource {
    /// Create a source reading from `path`, checking the file parses now.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let source = Self { path: path.into() };
        source.load()?;
        Ok(source)
    }

    /// Path of the saved response.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<RawRow>, FetchError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_response(&body)
    }
}

impl RowSource for StaticRowSource {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send {
        std::future::ready(self.load())
    }
}

/// The row source chosen at startup.
#[derive(Debug, Clone)]
pub enum StationSource {
    Live(WikidataClient),
    Static(StaticRowSource),
}

impl RowSource for StationSource {
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send {
        async move {
            match self {
                StationSource::Live(client) => client.fetch_all().await,
                StationSource::Static(source) => source.load(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RESPONSE: &str = r#"{
        "head": { "vars": ["station", "stationLabel"] },
        "results": { "bindings": [
            {
                "station": { "type": "uri", "value": "Q1" },
                "stationLabel": { "type": "literal", "value": "Valby" }
            }
        ] }
    }"#;

    #[tokio::test]
    async fn static_source_serves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, RESPONSE).unwrap();

        let source = StaticRowSource::new(&path).unwrap();
        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("stationLabel"), Some("Valby"));
    }

    #[tokio::test]
    async fn static_source_rereads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, RESPONSE).unwrap();
        let source = StationSource::Static(StaticRowSource::new(&path).unwrap());

        std::fs::write(&path, r#"{"head":{},"results":{"bindings":[]}}"#).unwrap();
        assert!(source.fetch_rows().await.unwrap().is_empty());
    }

    #[test]
    fn missing_file_rejected() {
        let err = StaticRowSource::new("/nonexistent/rows.json").unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn malformed_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            StaticRowSource::new(&path),
            Err(FetchError::Json { .. })
        ));
    }
}
