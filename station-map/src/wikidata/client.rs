//! Wikidata Query Service client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use super::error::FetchError;
use super::query::DEFAULT_QUERY;
use super::types::{RawRow, SparqlResponse};

/// Default SPARQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Media type of SPARQL JSON results.
const SPARQL_JSON: &str = "application/sparql-results+json";

/// Configuration for the Wikidata client.
#[derive(Debug, Clone)]
pub struct WikidataConfig {
    /// SPARQL endpoint URL
    pub endpoint: String,
    /// Query text
    pub query: String,
    /// User agent sent with each request (WDQS rejects anonymous clients)
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WikidataConfig {
    /// Create a config for the public endpoint and the built-in query.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: DEFAULT_QUERY.to_string(),
            user_agent: format!("station-map/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 60,
        }
    }

    /// Set a custom endpoint (for testing or a mirror).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Replace the query text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client that runs the station query against a SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct WikidataClient {
    http: reqwest::Client,
    endpoint: String,
    query: String,
}

impl WikidataClient {
    /// Create a new client.
    pub fn new(config: WikidataConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_JSON));

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| FetchError::Api {
                status: 0,
                message: "Invalid user agent".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            query: config.query,
        })
    }

    /// Run the query and return every result row.
    ///
    /// The query is posted as a form body, so long queries are not bound by
    /// URL length limits.
    ///
    /// Either the complete row set is returned or an error; rows are never
    /// handed out from a partial response.
    pub async fn fetch_all(&self) -> Result<Vec<RawRow>, FetchError> {
        debug!(endpoint = %self.endpoint, "running station query");

        let response = self.http.execute(self.query_request()?).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let rows = parse_response(&body)?;

        info!(rows = rows.len(), "fetched station rows");
        Ok(rows)
    }

    fn query_request(&self) -> Result<reqwest::Request, FetchError> {
        Ok(self
            .http
            .post(&self.endpoint)
            .form(&[("query", self.query.as_str()), ("format", "json")])
            .build()?)
    }
}

/// Parse a SPARQL JSON response body into rows.
pub fn parse_response(body: &str) -> Result<Vec<RawRow>, FetchError> {
    let response: SparqlResponse = serde_json::from_str(body).map_err(|e| FetchError::Json {
        message: e.to_string(),
    })?;
    Ok(response.into_rows())
}
