//! Domain error types.
//!
//! These errors represent validation failures when raw records are turned
//! into domain values. They are distinct from IO/CSV errors.

/// Domain-level errors for record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate was NaN or infinite
    #[error("non-finite {axis} coordinate: {value}")]
    NonFiniteCoordinate { axis: &'static str, value: f64 },

    /// A coordinate is finite but outside the valid degree range
    #[error("{axis} coordinate {value} outside [-{limit}, {limit}]")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
}
