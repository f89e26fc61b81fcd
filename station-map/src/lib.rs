//! Station map server.
//!
//! Fetches railway stations from Wikidata, merges the rows that describe
//! the same station, and keeps a web map's markers in step with the
//! merged, searchable view.

pub mod config;
pub mod domain;
pub mod engine;
pub mod map;
pub mod pipeline;
pub mod search;
pub mod store;
pub mod web;
pub mod wikidata;
