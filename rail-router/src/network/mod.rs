//! Railway network construction.
//!
//! Turns station and connection records into an immutable weighted graph:
//! the registry is built first, connections are validated against it, edges
//! are derived (geometric plus same-name transfers), and the graph is frozen.
//! A `Network` is built once and then shared read-only between queries.

mod config;
pub mod edges;
mod graph;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::domain::{Connection, Station};
use crate::registry::{RegistryError, StationRegistry};

pub use config::NetworkConfig;
pub use edges::{
    EdgeKind, EdgeSet, RejectReason, RejectedConnection, TransferMatch, TransferRule, WeightedEdge,
};
pub use graph::{Graph, GraphError};

/// Errors that prevent a network from being built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Station records are malformed
    #[error("invalid station data: {0}")]
    Registry(#[from] RegistryError),

    /// Edges were inconsistent with the node set
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}

/// Summary counts for a built network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub stations: usize,
    /// Undirected edges in the graph, after duplicates collapse.
    pub edges: usize,
    /// Graph edges between same-named stations. A transfer pair that also has
    /// a join record is one edge, counted here and in `edges` once.
    pub transfer_edges: usize,
    pub rejected_connections: usize,
}

/// Station registry and graph built from the same records.
#[derive(Debug, Clone)]
pub struct Network {
    registry: StationRegistry,
    graph: Graph,
    rejected: Vec<RejectedConnection>,
    transfer_edges: usize,
}

impl Network {
    /// Build a network using the configured transfer matching.
    pub fn build(
        stations: impl IntoIterator<Item = Station>,
        connections: impl IntoIterator<Item = Connection>,
        config: &NetworkConfig,
    ) -> Result<Self, NetworkError> {
        Self::build_with_rule(stations, connections, &config.transfer)
    }

    /// Build a network with a custom transfer rule.
    pub fn build_with_rule<R: TransferRule + ?Sized>(
        stations: impl IntoIterator<Item = Station>,
        connections: impl IntoIterator<Item = Connection>,
        rule: &R,
    ) -> Result<Self, NetworkError> {
        let registry = StationRegistry::from_stations(stations)?;
        let EdgeSet { edges, rejected } = edges::build_edges(&registry, connections, rule);
        let graph = Graph::build(registry.ids(), &edges)?;

        let transfer_edges = edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Transfer)
            .map(|e| if e.a <= e.b { (e.a, e.b) } else { (e.b, e.a) })
            .collect::<BTreeSet<_>>()
            .len();

        info!(
            stations = graph.node_count(),
            edges = graph.edge_count(),
            transfer_edges,
            rejected = rejected.len(),
            "Network built"
        );

        Ok(Self {
            registry,
            graph,
            rejected,
            transfer_edges,
        })
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Connections dropped during the build.
    pub fn rejected(&self) -> &[RejectedConnection] {
        &self.rejected
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            stations: self.registry.len(),
            edges: self.graph.edge_count(),
            transfer_edges: self.transfer_edges,
            rejected_connections: self.rejected.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StationId};

    fn id(n: u32) -> StationId {
        StationId::new(n)
    }

    fn station(n: u32, name: &str, line: u32, lon: f64, lat: f64) -> Station {
        Station::new(id(n), name, LineId::new(line), lon, lat).unwrap()
    }

    fn stations() -> Vec<Station> {
        vec![
            station(1, "Y", 1, 0.0, 0.0),
            station(2, "Central", 1, 0.0, 2.0),
            station(3, "Central", 2, 0.0, 2.0),
            station(4, "Z", 2, 0.0, 4.0),
        ]
    }

    #[test]
    fn build_reports_stats() {
        let network = Network::build(
            stations(),
            vec![
                Connection::new(id(1), id(2)),
                Connection::new(id(3), id(4)),
                Connection::new(id(4), id(2800701)),
            ],
            &NetworkConfig::default(),
        )
        .unwrap();

        assert_eq!(
            network.stats(),
            NetworkStats {
                stations: 4,
                edges: 3,
                transfer_edges: 1,
                rejected_connections: 1,
            }
        );
        assert_eq!(network.graph().weight(id(2), id(3)), Some(0.0));
        assert_eq!(network.graph().weight(id(1), id(2)), Some(2.0));
    }

    #[test]
    fn join_on_transfer_pair_counts_once() {
        let network = Network::build(
            stations(),
            vec![
                Connection::new(id(2), id(3)),
                Connection::new(id(3), id(2)),
            ],
            &NetworkConfig::default(),
        )
        .unwrap();

        let stats = network.stats();
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.transfer_edges, 1);
        assert!(stats.transfer_edges <= stats.edges);
        assert_eq!(network.graph().weight(id(2), id(3)), Some(0.0));
    }

    #[test]
    fn rejected_connection_absent_from_graph() {
        let network = Network::build(
            stations(),
            vec![Connection::new(id(1), id(77))],
            &NetworkConfig::default(),
        )
        .unwrap();

        assert_eq!(network.rejected().len(), 1);
        assert!(!network.graph().contains(id(77)));
        assert_eq!(network.graph().neighbors(id(1)).count(), 0);
    }

    #[test]
    fn duplicate_station_is_fatal() {
        let mut records = stations();
        records.push(station(1, "Y again", 3, 1.0, 1.0));
        let err = Network::build(records, Vec::<Connection>::new(), &NetworkConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::Registry(RegistryError::DuplicateStation(id(1)))
        );
    }

    #[test]
    fn custom_rule_disables_transfers() {
        let network = Network::build_with_rule(
            stations(),
            Vec::<Connection>::new(),
            &|_: &Station, _: &Station| false,
        )
        .unwrap();
        assert_eq!(network.stats().transfer_edges, 0);
        assert_eq!(network.graph().edge_count(), 0);
    }

    #[test]
    fn network_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Network>();
    }
}
