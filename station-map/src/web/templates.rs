//! Askama templates for the web frontend.

use askama::Template;

/// Map page with the search box.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Search-box text for the active terms
    pub query: String,

    /// Number of markers on the map
    pub marker_count: usize,

    /// Separator the search box splits terms on
    pub delimiter: char,
}
