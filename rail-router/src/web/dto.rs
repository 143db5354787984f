//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::StationId;
use crate::format::RouteStop;
use crate::planner::Route;
use crate::registry::{Candidate, Resolution};

/// Request to look up stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Exact station name
    pub name: String,

    /// Optional line name to pick one of several same-named stations
    pub line: Option<String>,
}

/// Response for a station lookup.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    /// One of `unique`, `ambiguous` or `not_found`
    pub resolution: &'static str,

    /// Matching stations, in ascending id order
    pub candidates: Vec<Candidate>,
}

impl From<Resolution> for StationSearchResponse {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Unique(candidate) => Self {
                resolution: "unique",
                candidates: vec![candidate],
            },
            Resolution::Ambiguous(candidates) => Self {
                resolution: "ambiguous",
                candidates,
            },
            Resolution::NotFound => Self {
                resolution: "not_found",
                candidates: Vec::new(),
            },
        }
    }
}

/// Request for a route between two station ids.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: StationId,
    pub to: StationId,
}

/// A route in JSON form.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: StationId,
    pub to: StationId,

    /// Sum of edge weights along the route
    pub cost: f64,

    /// Number of edges traversed
    pub hops: usize,

    /// Stops in travel order, origin first
    pub stops: Vec<RouteStop>,
}

impl RouteResponse {
    /// Create from a route and its resolved stops.
    pub fn new(route: &Route, stops: Vec<RouteStop>) -> Self {
        Self {
            from: route.origin(),
            to: route.destination(),
            cost: route.cost(),
            hops: route.hops(),
            stops,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Machine-readable error category
    pub kind: &'static str,
}
