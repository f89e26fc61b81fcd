//! Wikidata fetch error types.

/// Errors that can occur while fetching rows from the SPARQL endpoint.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint rejected our credentials or user agent
    #[error("unauthorized: the SPARQL endpoint refused the request")]
    Unauthorized,

    /// Rate limited by the endpoint
    #[error("rate limited by the SPARQL endpoint")]
    RateLimited,

    /// Endpoint returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a saved response or query file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = FetchError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = FetchError::Io {
            path: "rows.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read rows.json: missing");
    }
}
