//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::pipeline::{IngestError, RefreshError};
use crate::search::parse_search_terms;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// Static assets are served from the configured static directory.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/markers", get(list_markers))
        .route("/api/search", post(search))
        .route("/api/ingest", post(ingest))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let terms = state.terms.read().await;
    let marker_count = state.board.read().await.len();
    let delimiter = state.config.search_delimiter;

    let template = IndexTemplate {
        query: terms.join(&format!("{delimiter} ")),
        marker_count,
        delimiter,
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// List the markers currently on the map.
async fn list_markers(State(state): State<AppState>) -> Json<MarkersResponse> {
    let terms = state.terms.read().await.clone();
    let board = state.board.read().await;

    Json(MarkersResponse {
        terms,
        markers: board.iter().map(MarkerResult::from).collect(),
    })
}

/// Apply new search terms to the map.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let terms = parse_search_terms(&req.q, state.config.search_delimiter);
    let view = state.search(terms.clone()).await?;

    Ok(Json(SearchResponse { terms, view }))
}

/// Re-fetch from the source and redraw.
async fn ingest(State(state): State<AppState>) -> Result<Json<IngestResponse>, AppError> {
    let (ingest, view) = state.ingest().await?;
    Ok(Json(IngestResponse { ingest, view }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<RefreshError> for AppError {
    fn from(e: RefreshError) -> Self {
        match e {
            RefreshError::Filter(e) => AppError::BadRequest {
                message: e.to_string(),
            },
            RefreshError::Store(e) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Fetch(_) => AppError::BadGateway {
                message: e.to_string(),
            },
            IngestError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FilterError;
    use crate::store::StoreError;
    use crate::wikidata::FetchError;

    #[test]
    fn filter_errors_are_bad_requests() {
        let err: AppError = RefreshError::Filter(FilterError::InvalidTerm {
            term: "(".into(),
            reason: "unclosed group".into(),
        })
        .into();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn fetch_errors_are_bad_gateway() {
        let err: AppError = IngestError::Fetch(FetchError::RateLimited).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn map_script_renders_labels_as_text() {
        let script = std::fs::read_to_string("static/map.js").unwrap();
        assert!(script.contains("el.textContent = label"));
        assert!(script.contains("bindPopup(popupContent(m.label))"));
        assert!(!script.contains("bindPopup(m.label)"));
    }

    #[test]
    fn store_errors_are_internal() {
        let err: AppError = IngestError::Store(StoreError::Serialization {
            message: "broken".into(),
        })
        .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
