//! Application configuration.
//!
//! Everything has a default; environment variables override:
//!
//! | Variable                    | Meaning                                   |
//! |-----------------------------|-------------------------------------------|
//! | `STATION_MAP_ENDPOINT`      | SPARQL endpoint URL                       |
//! | `STATION_MAP_QUERY_FILE`    | file holding a replacement SPARQL query   |
//! | `STATION_MAP_STATIC_ROWS`   | saved SPARQL response to serve offline    |
//! | `STATION_MAP_STORE`         | path of the JSON record store             |
//! | `STATION_MAP_ADDR`          | listen address                            |
//! | `STATION_MAP_REFRESH_SECS`  | re-ingest interval in seconds             |
//! | `STATION_MAP_TIMEOUT_SECS`  | SPARQL request timeout in seconds         |
//! | `STATION_MAP_STATIC_DIR`    | directory of static web assets            |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::search::DEFAULT_DELIMITER;
use crate::wikidata::DEFAULT_ENDPOINT;

/// Default re-ingest interval (24 hours).
const DEFAULT_REFRESH: Duration = Duration::from_secs(24 * 60 * 60);

/// Default SPARQL request timeout.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Errors in configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} value is not valid unicode")]
    NotUnicode { name: &'static str },

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Configuration for the station map server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SPARQL endpoint URL.
    pub endpoint: String,
    /// Replacement query file; the built-in query is used when unset.
    pub query_file: Option<PathBuf>,
    /// Saved SPARQL response to serve instead of querying the endpoint.
    pub static_rows: Option<PathBuf>,
    /// Path of the JSON record store.
    pub store_path: PathBuf,
    /// Address to listen on.
    pub listen_addr: SocketAddr,
    /// How often to re-ingest from the source.
    pub refresh_interval: Duration,
    /// Request timeout for the SPARQL endpoint, in seconds.
    pub fetch_timeout_secs: u64,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Separator between search terms.
    pub search_delimiter: char,
}

impl AppConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let var = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value)),
                Err(std::env::VarError::NotPresent) => Ok(None),
                Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
            }
        };

        let mut config = Self::default();

        if let Some(endpoint) = var("STATION_MAP_ENDPOINT")? {
            config.endpoint = endpoint;
        }
        config.query_file = var("STATION_MAP_QUERY_FILE")?.map(PathBuf::from);
        config.static_rows = var("STATION_MAP_STATIC_ROWS")?.map(PathBuf::from);
        if let Some(path) = var("STATION_MAP_STORE")? {
            config.store_path = PathBuf::from(path);
        }
        if let Some(addr) = var("STATION_MAP_ADDR")? {
            config.listen_addr = addr.parse().map_err(|_| ConfigError::Invalid {
                name: "STATION_MAP_ADDR",
                value: addr.clone(),
            })?;
        }
        if let Some(secs) = var("STATION_MAP_REFRESH_SECS")? {
            config.refresh_interval =
                Duration::from_secs(positive_secs("STATION_MAP_REFRESH_SECS", &secs)?);
        }
        if let Some(secs) = var("STATION_MAP_TIMEOUT_SECS")? {
            config.fetch_timeout_secs = positive_secs("STATION_MAP_TIMEOUT_SECS", &secs)?;
        }
        if let Some(dir) = var("STATION_MAP_STATIC_DIR")? {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn positive_secs(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| ConfigError::Invalid {
            name,
            value: value.to_string(),
        })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query_file: None,
            static_rows: None,
            store_path: PathBuf::from("stations.json"),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            refresh_interval: DEFAULT_REFRESH,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            static_dir: PathBuf::from("static"),
            search_delimiter: DEFAULT_DELIMITER,
        }
    }
}
