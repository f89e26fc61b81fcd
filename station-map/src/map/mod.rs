//! Map marker surface.
//!
//! The map only knows about point markers: a position and a text label.
//! The engine talks to it through [`MarkerSurface`]; [`MarkerBoard`] is the
//! in-memory surface the web map renders from.

mod board;

pub use board::MarkerBoard;

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Position;

/// Identifier assigned to a marker by its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub u64);

/// A point marker currently displayed on a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Position,
    pub label: String,
}

/// A rendering surface that displays point markers.
pub trait MarkerSurface {
    /// Every marker currently displayed, in display order.
    fn markers(&self) -> Vec<Marker>;

    /// Add a marker at `position` with the given label.
    fn add_marker(&mut self, position: Position, label: &str) -> MarkerId;

    /// Remove a previously listed marker. Unknown markers are ignored.
    fn remove_marker(&mut self, marker: &Marker);

    /// Positions of every displayed marker.
    fn current_marker_positions(&self) -> HashSet<Position> {
        self.markers().into_iter().map(|m| m.position).collect()
    }
}
