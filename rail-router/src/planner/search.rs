//! Route planner over a shared network.

use std::sync::Arc;

use tracing::debug;

use crate::network::Network;

use super::config::PlanOptions;
use super::dijkstra::shortest_path;
use super::route::{PlanError, Route, RouteRequest};

/// Route planner bound to one network.
///
/// Cheap to clone; the network is shared, never mutated.
#[derive(Debug, Clone)]
pub struct Planner {
    network: Arc<Network>,
    options: PlanOptions,
}

impl Planner {
    /// Create a new planner.
    pub fn new(network: Arc<Network>, options: PlanOptions) -> Self {
        Self { network, options }
    }

    /// The network this planner searches.
    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Validate a request, then search for the shortest route.
    pub fn plan(&self, request: &RouteRequest) -> Result<Route, PlanError> {
        let graph = self.network.graph();
        request.validate(graph, &self.options)?;

        let result = shortest_path(graph, request.from, request.to);

        match &result {
            Ok(route) => debug!(
                from = %request.from,
                to = %request.to,
                hops = route.hops(),
                cost = route.cost(),
                "Route found"
            ),
            Err(e) => debug!(from = %request.from, to = %request.to, error = %e, "No route"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connection, LineId, Station, StationId};
    use crate::network::NetworkConfig;

    fn id(n: u32) -> StationId {
        StationId::new(n)
    }

    fn planner(options: PlanOptions) -> Planner {
        let stations = vec![
            Station::new(id(1), "A", LineId::new(1), 0.0, 0.0).unwrap(),
            Station::new(id(2), "B", LineId::new(1), 0.0, 1.0).unwrap(),
            Station::new(id(3), "C", LineId::new(2), 5.0, 5.0).unwrap(),
        ];
        let network = Network::build(
            stations,
            vec![Connection::new(id(1), id(2))],
            &NetworkConfig::default(),
        )
        .unwrap();
        Planner::new(Arc::new(network), options)
    }

    #[test]
    fn plans_connected_route() {
        let route = planner(PlanOptions::default())
            .plan(&RouteRequest::new(id(1), id(2)))
            .unwrap();
        assert_eq!(route.stations(), &[id(1), id(2)]);
        assert_eq!(route.cost(), 1.0);
    }

    #[test]
    fn disconnected_is_no_route() {
        let err = planner(PlanOptions::default())
            .plan(&RouteRequest::new(id(1), id(3)))
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::NoRoute {
                from: id(1),
                to: id(3)
            }
        );
    }

    #[test]
    fn validation_runs_before_search() {
        let p = planner(PlanOptions::default());
        assert!(matches!(
            p.plan(&RouteRequest::new(id(2), id(2))),
            Err(PlanError::InvalidQuery(_))
        ));
        assert_eq!(
            p.plan(&RouteRequest::new(id(2), id(42))),
            Err(PlanError::UnknownStation(id(42)))
        );
    }

    #[test]
    fn same_station_allowed_when_configured() {
        let route = planner(PlanOptions::new(true))
            .plan(&RouteRequest::new(id(2), id(2)))
            .unwrap();
        assert_eq!(route.stations(), &[id(2)]);
        assert_eq!(route.cost(), 0.0);
    }
}
