//! Name → station resolution.
//!
//! Route queries take station ids, never names. This turns a human-entered
//! name, optionally narrowed by a line name, into a single id when the input
//! is unambiguous, and reports the remaining candidates when it is not.

use serde::Serialize;

use crate::domain::StationId;

use super::table::{Candidate, StationRegistry};

/// Outcome of resolving a station name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resolution", content = "candidates", rename_all = "snake_case")]
pub enum Resolution {
    /// Exactly one station matches.
    Unique(Candidate),
    /// Several stations match; the caller must narrow further.
    Ambiguous(Vec<Candidate>),
    /// No station matches the name (and line, if given).
    NotFound,
}

impl Resolution {
    /// The resolved id, if unambiguous.
    pub fn id(&self) -> Option<StationId> {
        match self {
            Resolution::Unique(candidate) => Some(candidate.id),
            _ => None,
        }
    }
}

impl StationRegistry {
    /// Resolve a station name, optionally filtered by line name.
    ///
    /// The line filter is only applied when it is given; a filter that
    /// matches nothing yields [`Resolution::NotFound`].
    pub fn resolve(&self, name: &str, line_name: Option<&str>) -> Resolution {
        let mut candidates = self.candidates_by_name(name);

        if let Some(line) = line_name {
            candidates.retain(|c| c.line_name.as_deref() == Some(line));
        }

        match candidates.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unique(candidates.remove(0)),
            _ => Resolution::Ambiguous(candidates),
        }
    }
}
