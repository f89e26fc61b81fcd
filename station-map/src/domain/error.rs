//! Domain error types.
//!
//! These errors represent validation failures when building domain
//! values. They are distinct from fetch/store/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station names are the aggregation key and may not be blank
    #[error("station name must not be empty")]
    EmptyName,

    /// The external station identifier is missing
    #[error("station identifier must not be empty")]
    EmptyStationId,

    /// A coordinate was NaN or infinite
    #[error("{axis} must be a finite number, got {value}")]
    NonFiniteCoordinate { axis: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::EmptyName.to_string(),
            "station name must not be empty"
        );
        assert_eq!(
            DomainError::EmptyStationId.to_string(),
            "station identifier must not be empty"
        );

        let err = DomainError::NonFiniteCoordinate {
            axis: "latitude",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "latitude must be a finite number, got inf");
    }
}
