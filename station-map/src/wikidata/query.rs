//! The SPARQL query selecting Danish railway stations.

use std::path::Path;

use super::error::FetchError;

/// Built-in query: every Danish railway station with its UIC code,
/// transport network, address, type, connecting lines, opening date and
/// coordinates. Variable names are the ones row conversion expects.
pub const DEFAULT_QUERY: &str = r#"SELECT DISTINCT ?station ?stationLabel ?stationID ?transportNetworkLabel
       ?address ?BaneTypeLabel ?connectingLineLabel ?openingDate
       ?geoLatitude ?geoLongitude
WHERE {
  ?station wdt:P31/wdt:P279* wd:Q55488 ;
           wdt:P17 wd:Q35 .
  OPTIONAL { ?station wdt:P722 ?stationID . }
  OPTIONAL { ?station wdt:P16 ?transportNetwork . }
  OPTIONAL { ?station wdt:P6375 ?address . }
  OPTIONAL { ?station wdt:P31 ?BaneType . }
  OPTIONAL { ?station wdt:P81 ?connectingLine . }
  OPTIONAL { ?station wdt:P1619 ?openingDate . }
  OPTIONAL {
    ?station p:P625 ?coordinate .
    ?coordinate psv:P625 ?coordinateNode .
    ?coordinateNode wikibase:geoLatitude ?geoLatitude ;
                    wikibase:geoLongitude ?geoLongitude .
  }
  SERVICE wikibase:label { bd:serviceParam wikibase:language "da,en". }
}"#;

/// Load a query from a file, replacing the built-in one.
pub fn load_query(path: impl AsRef<Path>) -> Result<String, FetchError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.display().to_string(),
        source,
    })
}
