//! Route queries, results and errors.

use serde::Serialize;

use crate::domain::StationId;
use crate::network::Graph;

use super::config::PlanOptions;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The query itself is not acceptable
    #[error("invalid route query: {0}")]
    InvalidQuery(String),

    /// A station id is not part of the network
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// The network does not connect the two stations
    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },

    /// The search task did not run to completion
    #[error("route search aborted: {0}")]
    Aborted(String),
}

/// Request for a route between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub from: StationId,
    pub to: StationId,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(from: StationId, to: StationId) -> Self {
        Self { from, to }
    }

    /// Validate the request against a graph.
    pub fn validate(&self, graph: &Graph, options: &PlanOptions) -> Result<(), PlanError> {
        for id in [self.from, self.to] {
            if !graph.contains(id) {
                return Err(PlanError::UnknownStation(id));
            }
        }

        if self.from == self.to && !options.allow_same_station {
            return Err(PlanError::InvalidQuery(
                "origin and destination are the same station".to_string(),
            ));
        }

        Ok(())
    }
}

/// A shortest route: station ids from origin to destination, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    stations: Vec<StationId>,
    cost: f64,
}

impl Route {
    /// Construct a route. The station list must be non-empty.
    pub(crate) fn new(stations: Vec<StationId>, cost: f64) -> Self {
        debug_assert!(!stations.is_empty());
        Self { stations, cost }
    }

    /// Stations along the route, origin first.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Sum of edge weights along the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Origin station.
    pub fn origin(&self) -> StationId {
        self.stations[0]
    }

    /// Destination station.
    pub fn destination(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.stations.len() - 1
    }
}
