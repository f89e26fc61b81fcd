//! Geographic positions.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 latitude/longitude pair.
///
/// Both coordinates are finite by construction, so positions can be
/// compared and hashed by bit pattern and used as set members. Negative
/// zero is folded into positive zero so that `0.0` and `-0.0` are the same
/// position.
///
/// # Examples
///
/// ```
/// use station_map::domain::Position;
///
/// let a = Position::new(55.6833, 12.5713).unwrap();
/// let b = Position::new(55.6833, 12.5713).unwrap();
/// assert_eq!(a, b);
///
/// assert!(Position::new(f64::NAN, 12.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position, rejecting NaN and infinite coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        Ok(Self {
            latitude: finite("latitude", latitude)?,
            longitude: finite("longitude", longitude)?,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    fn key(&self) -> (u64, u64) {
        (fold_zero(self.latitude).to_bits(), fold_zero(self.longitude).to_bits())
    }
}

/// Validate that a coordinate is finite.
pub(crate) fn finite(axis: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFiniteCoordinate { axis, value })
    }
}

fn fold_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_non_finite() {
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::INFINITY).is_err());
        assert!(Position::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn negative_zero_equals_zero() {
        let a = Position::new(0.0, -0.0).unwrap();
        let b = Position::new(-0.0, 0.0).unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn distinct_positions_differ() {
        let a = Position::new(55.6833, 12.5713).unwrap();
        let b = Position::new(55.6833, 12.5714).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn display() {
        let p = Position::new(55.5, 12.25).unwrap();
        assert_eq!(p.to_string(), "(55.5, 12.25)");
    }
}
