//! In-memory marker surface.

use super::{Marker, MarkerId, MarkerSurface};
use crate::domain::Position;

/// Marker set held in memory and served to the browser map.
#[derive(Debug, Clone, Default)]
pub struct MarkerBoard {
    markers: Vec<Marker>,
    next_id: u64,
}

impl MarkerBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of displayed markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if no markers are displayed.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Borrow the displayed markers without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }
}

impl MarkerSurface for MarkerBoard {
    fn markers(&self) -> Vec<Marker> {
        self.markers.clone()
    }

    fn add_marker(&mut self, position: Position, label: &str) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker {
            id,
            position,
            label: label.to_string(),
        });
        id
    }

    fn remove_marker(&mut self, marker: &Marker) {
        self.markers.retain(|m| m.id != marker.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut board = MarkerBoard::new();
        let a = board.add_marker(pos(1.0, 1.0), "a");
        let b = board.add_marker(pos(2.0, 2.0), "b");
        assert!(a < b);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn remove_by_id_only() {
        let mut board = MarkerBoard::new();
        board.add_marker(pos(1.0, 1.0), "a");
        board.add_marker(pos(1.0, 1.0), "duplicate");

        let first = board.markers()[0].clone();
        board.remove_marker(&first);

        let remaining = board.markers();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].label, "duplicate");
    }

    #[test]
    fn removing_unknown_marker_is_noop() {
        let mut board = MarkerBoard::new();
        board.add_marker(pos(1.0, 1.0), "a");
        let ghost = Marker {
            id: MarkerId(42),
            position: pos(1.0, 1.0),
            label: "ghost".into(),
        };
        board.remove_marker(&ghost);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn positions_are_deduplicated() {
        let mut board = MarkerBoard::new();
        board.add_marker(pos(1.0, 1.0), "a");
        board.add_marker(pos(1.0, 1.0), "b");
        board.add_marker(pos(2.0, 2.0), "c");
        assert_eq!(board.current_marker_positions().len(), 2);
    }
}
