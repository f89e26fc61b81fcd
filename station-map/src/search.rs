//! Search box input parsing.

/// Default separator between search terms.
pub const DEFAULT_DELIMITER: char = ',';

/// Split raw search-box text into filter terms.
///
/// Pieces are trimmed and empty pieces dropped, so blank input yields no
/// terms (and therefore no filtering).
///
/// # Examples
///
/// ```
/// use station_map::search::parse_search_terms;
///
/// assert_eq!(parse_search_terms("c line, aarhus", ','), ["c line", "aarhus"]);
/// assert!(parse_search_terms("  ", ',').is_empty());
/// ```
pub fn parse_search_terms(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
