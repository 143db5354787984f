//! Station registry and name lookup.
//!
//! Provides station id → attributes mapping, plus name → candidate lookup for
//! names that are shared by several stations on different lines.

mod error;
mod resolve;
mod table;

pub use error::{LookupError, RegistryError};
pub use resolve::Resolution;
pub use table::{Candidate, StationRegistry};
