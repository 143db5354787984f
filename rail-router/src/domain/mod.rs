//! Domain types for the route finder.
//!
//! This module contains the core domain model types that represent
//! validated railway data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod connection;
mod error;
mod station;

pub use connection::Connection;
pub use error::DomainError;
pub use station::{Coordinates, LineId, Station, StationId};
