//! Minimal marker updates between a surface and a station set.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{AggregatedStation, Position};
use crate::map::{Marker, MarkerSurface};

/// Marker operations that bring a surface in line with a station set.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDiff<'a> {
    /// Stations to place, at most one per position.
    pub to_add: Vec<&'a AggregatedStation>,
    /// Markers to take down.
    pub to_remove: Vec<Marker>,
}

impl MarkerDiff<'_> {
    /// Returns true if applying the diff would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the marker changes needed to display exactly `stations`.
///
/// Markers whose position no station occupies are removed, as is every
/// marker after the first at a shared position. Stations are added when no
/// marker sits at their position yet; if several stations share a position
/// the last one wins. Stations without a position are ignored and never
/// cause a removal.
pub fn diff_markers<'a>(current: &[Marker], stations: &'a [AggregatedStation]) -> MarkerDiff<'a> {
    let current_positions: HashSet<Position> = current.iter().map(|m| m.position).collect();
    let mut targets: HashSet<Position> = HashSet::new();
    let mut slots: HashMap<Position, usize> = HashMap::new();
    let mut to_add: Vec<&'a AggregatedStation> = Vec::new();

    for station in stations {
        let Some(position) = station.position() else {
            continue;
        };
        targets.insert(position);
        if current_positions.contains(&position) {
            continue;
        }
        match slots.get(&position) {
            Some(&idx) => to_add[idx] = station,
            None => {
                slots.insert(position, to_add.len());
                to_add.push(station);
            }
        }
    }

    let mut seen: HashSet<Position> = HashSet::new();
    let to_remove = current
        .iter()
        .filter(|m| !targets.contains(&m.position) || !seen.insert(m.position))
        .cloned()
        .collect();

    MarkerDiff { to_add, to_remove }
}

/// Apply a diff to a surface: removals first, then additions.
///
/// Added markers are labelled with the station description. Returns the
/// number of markers added and removed.
pub fn apply_diff<S: MarkerSurface + ?Sized>(
    surface: &mut S,
    diff: &MarkerDiff<'_>,
) -> (usize, usize) {
    for marker in &diff.to_remove {
        surface.remove_marker(marker);
    }

    let mut added = 0;
    for station in &diff.to_add {
        if let Some(position) = station.position() {
            surface.add_marker(position, station.description());
            added += 1;
        }
    }

    debug!(added, removed = diff.to_remove.len(), "applied marker diff");
    (added, diff.to_remove.len())
}
