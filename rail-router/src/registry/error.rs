//! Station registry error types.

use crate::domain::StationId;

/// Errors that make a set of station records unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same station id appeared on more than one record
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),
}

/// A single lookup that missed.
///
/// This never aborts a build; callers decide what a miss means for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No station with this id is registered
    #[error("unknown station {0}")]
    UnknownStation(StationId),
}
