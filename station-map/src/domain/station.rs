//! Aggregated stations.
//!
//! One `AggregatedStation` exists per distinct station name within a
//! reconciliation pass. It accumulates the multi-valued attributes of every
//! raw row sharing that name and keeps a display description in step with
//! them.

use serde::Serialize;

use super::{Position, RawRecord};

/// A station deduplicated by name.
///
/// Identity (`station_id`) and `position` come from the first record seen
/// with this name and are never overwritten. The three attribute lists keep
/// insertion order and never contain duplicates. `description` is rebuilt
/// by every mutation, so it always reflects the current lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedStation {
    station_id: String,
    name: String,
    position: Option<Position>,
    station_types: Vec<String>,
    connecting_lines: Vec<String>,
    transport_networks: Vec<String>,
    description: String,
}

impl AggregatedStation {
    /// Seed a station from the first record seen with its name.
    pub fn from_record(record: &RawRecord) -> Self {
        let mut station = Self {
            station_id: record.station_id.clone(),
            name: record.name.clone(),
            position: record.position(),
            station_types: Vec::new(),
            connecting_lines: Vec::new(),
            transport_networks: Vec::new(),
            description: String::new(),
        };
        station.absorb(record);
        station
    }

    /// Merge a record's multi-valued attributes into this station.
    ///
    /// Absent values and values already present are skipped. Identity and
    /// position are left untouched. Returns whether anything was added.
    pub fn absorb(&mut self, record: &RawRecord) -> bool {
        debug_assert_eq!(record.name, self.name);

        let mut changed = false;
        changed |= push_unique(&mut self.station_types, record.station_type.as_deref());
        changed |= push_unique(&mut self.connecting_lines, record.connecting_line.as_deref());
        changed |= push_unique(
            &mut self.transport_networks,
            record.transport_network.as_deref(),
        );

        self.description = self.describe();
        changed
    }

    /// Identifier of the first record seen with this name.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Station name (the aggregation key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the first record seen with this name, if it had one.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Distinct station types in first-seen order.
    pub fn station_types(&self) -> &[String] {
        &self.station_types
    }

    /// Distinct connecting lines in first-seen order.
    pub fn connecting_lines(&self) -> &[String] {
        &self.connecting_lines
    }

    /// Distinct transport networks in first-seen order.
    pub fn transport_networks(&self) -> &[String] {
        &self.transport_networks
    }

    /// Human-readable summary used as the marker label.
    pub fn description(&self) -> &str {
        &self.description
    }

    fn describe(&self) -> String {
        let mut text = self.name.clone();
        for (heading, values) in [
            ("Types", &self.station_types),
            ("Lines", &self.connecting_lines),
            ("Networks", &self.transport_networks),
        ] {
            if !values.is_empty() {
                text.push('\n');
                text.push_str(heading);
                text.push_str(": ");
                text.push_str(&values.join(", "));
            }
        }
        text
    }
}

fn push_unique(values: &mut Vec<String>, value: Option<&str>) -> bool {
    match value {
        Some(v) if !values.iter().any(|existing| existing == v) => {
            values.push(v.to_string());
            true
        }
        _ => false,
    }
}
