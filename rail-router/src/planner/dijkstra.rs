//! Dijkstra shortest-path search.
//!
//! All search state (distances, predecessors, settled flags, frontier) is
//! allocated per call, so any number of searches may run against the same
//! shared `Graph` concurrently.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::domain::StationId;
use crate::network::Graph;

use super::route::{PlanError, Route};

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest tentative
/// distance first and, among equal distances, the lowest station id.
///
/// Dense node indices follow ascending id order, so comparing indices is
/// comparing ids.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Find the minimum-weight route between two stations.
///
/// Returns [`PlanError::UnknownStation`] if either station is not a node, and
/// [`PlanError::NoRoute`] if the destination cannot be reached. Searching from
/// a station to itself yields a single-station route of cost zero.
///
/// Results are deterministic: a distance is only replaced by a strictly
/// smaller one, and nodes are expanded in (distance, id) order over
/// id-sorted adjacency, so equal-cost alternatives always resolve the same way.
pub fn shortest_path(
    graph: &Graph,
    source: StationId,
    goal: StationId,
) -> Result<Route, PlanError> {
    let start = graph
        .index_of(source)
        .ok_or(PlanError::UnknownStation(source))?;
    let target = graph
        .index_of(goal)
        .ok_or(PlanError::UnknownStation(goal))?;

    let n = graph.node_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut frontier = BinaryHeap::new();

    distance[start] = 0.0;
    frontier.push(Frontier {
        distance: 0.0,
        node: start,
    });

    let mut expanded = 0usize;

    while let Some(Frontier { distance: d, node }) = frontier.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        expanded += 1;

        if node == target {
            break;
        }

        for &(next, weight) in graph.neighbors_by_index(node) {
            if settled[next] {
                continue;
            }
            let candidate = d + weight;
            if candidate < distance[next] {
                distance[next] = candidate;
                predecessor[next] = Some(node);
                frontier.push(Frontier {
                    distance: candidate,
                    node: next,
                });
            }
        }
    }

    trace!(%source, %goal, expanded, "Search finished");

    if !settled[target] {
        return Err(PlanError::NoRoute {
            from: source,
            to: goal,
        });
    }

    let mut path = vec![graph.id_at(target)];
    let mut cursor = target;
    while let Some(prev) = predecessor[cursor] {
        path.push(graph.id_at(prev));
        cursor = prev;
    }
    path.reverse();

    Ok(Route::new(path, distance[target]))
}
