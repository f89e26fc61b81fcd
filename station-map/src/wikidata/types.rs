//! SPARQL JSON result DTOs.
//!
//! These types map directly to the W3C SPARQL 1.1 JSON results format as
//! returned by the Wikidata Query Service. Unbound variables are simply
//! missing from a binding.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Top-level SPARQL SELECT response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SparqlResponse {
    pub head: SparqlHead,
    pub results: SparqlResults,
}

/// Response header listing the projected variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

/// Result rows.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SparqlResults {
    pub bindings: Vec<HashMap<String, SparqlValue>>,
}

/// A single bound value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SparqlValue {
    /// `uri`, `literal` or `bnode`
    #[serde(rename = "type")]
    pub kind: String,

    /// Lexical form of the value
    pub value: String,

    /// Language tag for language-tagged literals
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Datatype IRI for typed literals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl SparqlResponse {
    /// Flatten the bindings into untyped rows.
    pub fn into_rows(self) -> Vec<RawRow> {
        self.results
            .bindings
            .into_iter()
            .map(RawRow::from_binding)
            .collect()
    }
}

/// One untyped result row: variable name → lexical value.
///
/// Variables the query left unbound are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    /// Build a row from a SPARQL binding, keeping only the lexical values.
    pub fn from_binding(binding: HashMap<String, SparqlValue>) -> Self {
        Self {
            fields: binding.into_iter().map(|(k, v)| (k, v.value)).collect(),
        }
    }

    /// Set a field (used when building rows by hand).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Look up a field's value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}
