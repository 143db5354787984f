//! Weighted edge derivation.
//!
//! Raw connections are validated one by one against the registry and split
//! into accepted and rejected sets before any edge is built. Accepted
//! connections become geometric edges; a separate pass over shared station
//! names adds zero-weight transfer edges.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Connection, Station, StationId};
use crate::registry::StationRegistry;

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Derived from a connection record, weighted by distance.
    Geometric,
    /// Synthetic zero-cost link between same-named stations.
    Transfer,
}

/// An undirected edge with a non-negative weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub a: StationId,
    pub b: StationId,
    pub weight: f64,
    pub kind: EdgeKind,
}

impl WeightedEdge {
    /// Edge weighted by the planar distance between two stations.
    pub fn geometric(a: &Station, b: &Station) -> Self {
        Self {
            a: a.id,
            b: b.id,
            weight: a.coordinates.planar_distance(&b.coordinates),
            kind: EdgeKind::Geometric,
        }
    }

    /// Zero-weight transfer edge.
    pub fn transfer(a: StationId, b: StationId) -> Self {
        Self {
            a,
            b,
            weight: 0.0,
            kind: EdgeKind::Transfer,
        }
    }
}

/// Why a raw connection was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// One or both endpoints are not registered.
    MissingEndpoint { missing: Vec<StationId> },
    /// Both endpoints are the same station.
    SelfLoop,
}

/// A connection that did not make it into the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedConnection {
    pub connection: Connection,
    pub reason: RejectReason,
}

/// Result of validating raw connections.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub accepted: Vec<Connection>,
    pub rejected: Vec<RejectedConnection>,
}

/// Check one connection against the registry.
pub fn validate_connection(
    registry: &StationRegistry,
    connection: &Connection,
) -> Result<(), RejectReason> {
    let missing: Vec<StationId> = [connection.a, connection.b]
        .into_iter()
        .filter(|id| !registry.contains(*id))
        .collect();

    if !missing.is_empty() {
        let mut missing = missing;
        missing.dedup();
        return Err(RejectReason::MissingEndpoint { missing });
    }

    if connection.is_self_loop() {
        return Err(RejectReason::SelfLoop);
    }

    Ok(())
}

/// Split raw connections into those usable for edges and those dropped.
///
/// Every record is judged on its own; order of the input is preserved in
/// both halves.
pub fn partition_connections(
    registry: &StationRegistry,
    connections: impl IntoIterator<Item = Connection>,
) -> Partition {
    let mut partition = Partition::default();

    for connection in connections {
        match validate_connection(registry, &connection) {
            Ok(()) => partition.accepted.push(connection),
            Err(reason) => partition
                .rejected
                .push(RejectedConnection { connection, reason }),
        }
    }

    partition
}

/// Build distance-weighted edges for accepted connections.
///
/// Connections whose endpoints are not registered are skipped; callers are
/// expected to have run [`partition_connections`] first.
pub fn geometric_edges(registry: &StationRegistry, accepted: &[Connection]) -> Vec<WeightedEdge> {
    accepted
        .iter()
        .filter_map(|c| {
            let a = registry.get(c.a)?;
            let b = registry.get(c.b)?;
            Some(WeightedEdge::geometric(a, b))
        })
        .collect()
}

/// Decides whether two same-named stations may be transferred between.
pub trait TransferRule {
    fn permits(&self, a: &Station, b: &Station) -> bool;
}

/// Built-in transfer matching predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferMatch {
    /// Any two stations with the same name.
    SameName,
    /// Same name and identical coordinates.
    ///
    /// Guards against merging unrelated stations that happen to share a
    /// name in different parts of the country.
    #[default]
    SameNameAndCoordinates,
}

impl TransferRule for TransferMatch {
    fn permits(&self, a: &Station, b: &Station) -> bool {
        if a.name != b.name {
            return false;
        }
        match self {
            TransferMatch::SameName => true,
            TransferMatch::SameNameAndCoordinates => a.coordinates == b.coordinates,
        }
    }
}

impl<F> TransferRule for F
where
    F: Fn(&Station, &Station) -> bool,
{
    fn permits(&self, a: &Station, b: &Station) -> bool {
        self(a, b)
    }
}

/// Build zero-weight transfer edges between same-named stations.
///
/// Only pairs within a name group are considered, and the rule sees each
/// unordered pair once with the lower id first.
pub fn transfer_edges<R: TransferRule + ?Sized>(
    registry: &StationRegistry,
    rule: &R,
) -> Vec<WeightedEdge> {
    let mut edges = Vec::new();

    for (name, ids) in registry.name_groups() {
        let stations: Vec<&Station> = ids.iter().filter_map(|id| registry.get(*id)).collect();

        for (i, a) in stations.iter().enumerate() {
            for b in &stations[i + 1..] {
                if rule.permits(a, b) {
                    edges.push(WeightedEdge::transfer(a.id, b.id));
                }
            }
        }

        debug!(name, stations = ids.len(), "Transfer group processed");
    }

    edges
}

/// All edges for a network, plus the connections that were dropped.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    pub edges: Vec<WeightedEdge>,
    pub rejected: Vec<RejectedConnection>,
}

/// Run validation, geometric edges and transfer edges in one pass.
///
/// Rejections are logged and returned; they never fail the build.
pub fn build_edges<R: TransferRule + ?Sized>(
    registry: &StationRegistry,
    connections: impl IntoIterator<Item = Connection>,
    rule: &R,
) -> EdgeSet {
    let Partition { accepted, rejected } = partition_connections(registry, connections);

    for r in &rejected {
        warn!(
            a = %r.connection.a,
            b = %r.connection.b,
            reason = ?r.reason,
            "Dropping connection"
        );
    }

    let mut edges = geometric_edges(registry, &accepted);
    let geometric = edges.len();
    edges.extend(transfer_edges(registry, rule));

    debug!(
        geometric,
        transfer = edges.len() - geometric,
        rejected = rejected.len(),
        "Edges built"
    );

    EdgeSet { edges, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineId;

    fn id(n: u32) -> StationId {
        StationId::new(n)
    }

    fn station(n: u32, name: &str, line: u32, lon: f64, lat: f64) -> Station {
        Station::new(id(n), name, LineId::new(line), lon, lat).unwrap()
    }

    fn registry() -> StationRegistry {
        StationRegistry::from_stations(vec![
            station(1, "A", 1, 0.0, 0.0),
            station(2, "B", 1, 4.0, 3.0),
            station(3, "Central", 1, 1.0, 1.0),
            station(4, "Central", 2, 1.0, 1.0),
            station(5, "Central", 3, 9.0, 9.0),
        ])
        .unwrap()
    }

    #[test]
    fn partition_keeps_known_connections() {
        let p = partition_connections(
            &registry(),
            vec![Connection::new(id(1), id(2)), Connection::new(id(2), id(3))],
        );
        assert_eq!(p.accepted.len(), 2);
        assert!(p.rejected.is_empty());
    }

    #[test]
    fn partition_rejects_missing_endpoint() {
        let p = partition_connections(
            &registry(),
            vec![
                Connection::new(id(1), id(99)),
                Connection::new(id(98), id(97)),
                Connection::new(id(1), id(2)),
            ],
        );
        assert_eq!(p.accepted, vec![Connection::new(id(1), id(2))]);
        assert_eq!(p.rejected.len(), 2);
        assert_eq!(
            p.rejected[0].reason,
            RejectReason::MissingEndpoint {
                missing: vec![id(99)]
            }
        );
        assert_eq!(
            p.rejected[1].reason,
            RejectReason::MissingEndpoint {
                missing: vec![id(98), id(97)]
            }
        );
    }

    #[test]
    fn partition_rejects_self_loop() {
        let p = partition_connections(&registry(), vec![Connection::new(id(2), id(2))]);
        assert!(p.accepted.is_empty());
        assert_eq!(p.rejected[0].reason, RejectReason::SelfLoop);
    }

    #[test]
    fn missing_self_loop_reports_id_once() {
        let reason = validate_connection(&registry(), &Connection::new(id(50), id(50)));
        assert_eq!(
            reason,
            Err(RejectReason::MissingEndpoint {
                missing: vec![id(50)]
            })
        );
    }

    #[test]
    fn geometric_weight_is_distance() {
        let edges = geometric_edges(&registry(), &[Connection::new(id(1), id(2))]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 5.0);
        assert_eq!(edges[0].kind, EdgeKind::Geometric);
    }

    #[test]
    fn transfer_same_name_links_every_pair() {
        let edges = transfer_edges(&registry(), &TransferMatch::SameName);
        let pairs: Vec<_> = edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(id(3), id(4)), (id(3), id(5)), (id(4), id(5))]);
        assert!(edges.iter().all(|e| e.weight == 0.0));
        assert!(edges.iter().all(|e| e.kind == EdgeKind::Transfer));
    }

    #[test]
    fn transfer_with_coordinates_skips_distant_namesake() {
        let edges = transfer_edges(&registry(), &TransferMatch::SameNameAndCoordinates);
        let pairs: Vec<_> = edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(id(3), id(4))]);
    }

    #[test]
    fn transfer_accepts_closure_rule() {
        let only_line_two = |a: &Station, b: &Station| a.line.get() == 2 || b.line.get() == 2;
        let edges = transfer_edges(&registry(), &only_line_two);
        let pairs: Vec<_> = edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(id(3), id(4)), (id(4), id(5))]);
    }

    #[test]
    fn build_edges_combines_passes() {
        let set = build_edges(
            &registry(),
            vec![
                Connection::new(id(1), id(2)),
                Connection::new(id(2), id(3)),
                Connection::new(id(4), id(404)),
            ],
            &TransferMatch::default(),
        );
        assert_eq!(set.edges.len(), 3);
        assert_eq!(set.rejected.len(), 1);
        assert_eq!(set.rejected[0].connection, Connection::new(id(4), id(404)));
    }

    #[test]
    fn transfer_match_default_requires_coordinates() {
        assert_eq!(
            TransferMatch::default(),
            TransferMatch::SameNameAndCoordinates
        );
    }

    #[test]
    fn reject_reason_serializes_with_tag() {
        let json = serde_json::to_value(RejectReason::MissingEndpoint {
            missing: vec![id(7)],
        })
        .unwrap();
        assert_eq!(json["reason"], "missing_endpoint");
        assert_eq!(json["missing"][0], 7);
    }
}
