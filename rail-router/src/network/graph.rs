//! Immutable adjacency structure for route search.

use std::collections::{BTreeMap, HashMap};

use crate::domain::StationId;

use super::edges::WeightedEdge;

/// Errors from graph construction.
///
/// These indicate a bug in whatever produced the edges, not bad input data:
/// the edge builder only emits edges between registered stations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// An edge refers to a station that is not a node
    #[error("edge {a}-{b} refers to unknown station {missing}")]
    UnknownEndpoint {
        a: StationId,
        b: StationId,
        missing: StationId,
    },

    /// An edge weight is negative, NaN or infinite
    #[error("edge {a}-{b} has invalid weight {weight}")]
    InvalidWeight { a: StationId, b: StationId, weight: f64 },
}

/// Undirected weighted graph over station ids.
///
/// Nodes are stored densely in ascending id order. Adjacency is compact:
/// node `i`'s neighbours are `adjacency[offsets[i]..offsets[i + 1]]`, sorted
/// by neighbour id. Parallel edges between the same pair are collapsed to
/// the cheapest one, so feeding a connection twice changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<StationId>,
    index: HashMap<StationId, usize>,
    offsets: Vec<usize>,
    adjacency: Vec<(usize, f64)>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from node ids and edges.
    ///
    /// Duplicate node ids are ignored. Self-loops are dropped since they can
    /// never be part of a shortest path.
    pub fn build(
        nodes: impl IntoIterator<Item = StationId>,
        edges: &[WeightedEdge],
    ) -> Result<Self, GraphError> {
        let mut nodes: Vec<StationId> = nodes.into_iter().collect();
        nodes.sort_unstable();
        nodes.dedup();

        let index: HashMap<StationId, usize> =
            nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        // Cheapest weight per unordered index pair.
        let mut unique: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for edge in edges {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    a: edge.a,
                    b: edge.b,
                    weight: edge.weight,
                });
            }

            let lookup = |id: StationId| {
                index.get(&id).copied().ok_or(GraphError::UnknownEndpoint {
                    a: edge.a,
                    b: edge.b,
                    missing: id,
                })
            };
            let i = lookup(edge.a)?;
            let j = lookup(edge.b)?;
            if i == j {
                continue;
            }

            let key = (i.min(j), i.max(j));
            unique
                .entry(key)
                .and_modify(|w| *w = w.min(edge.weight))
                .or_insert(edge.weight);
        }

        let (offsets, adjacency) = Self::build_adjacency(nodes.len(), &unique);

        Ok(Self {
            nodes,
            index,
            offsets,
            adjacency,
            edge_count: unique.len(),
        })
    }

    /// Build compact adjacency lists from deduplicated edges.
    fn build_adjacency(
        node_count: usize,
        unique: &BTreeMap<(usize, usize), f64>,
    ) -> (Vec<usize>, Vec<(usize, f64)>) {
        let mut per_node: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        for (&(i, j), &w) in unique {
            per_node[i].push((j, w));
            per_node[j].push((i, w));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut adjacency = Vec::with_capacity(unique.len() * 2);
        offsets.push(0);
        for mut list in per_node {
            list.sort_unstable_by_key(|(n, _)| *n);
            adjacency.extend(list);
            offsets.push(adjacency.len());
        }

        (offsets, adjacency)
    }

    /// All node ids, ascending.
    pub fn nodes(&self) -> &[StationId] {
        &self.nodes
    }

    /// Returns true if the id is a node.
    pub fn contains(&self, id: StationId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges after deduplication.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbours of a node with edge weights, ascending by neighbour id.
    ///
    /// Unknown ids have no neighbours.
    pub fn neighbors(&self, id: StationId) -> impl Iterator<Item = (StationId, f64)> + '_ {
        let range = match self.index.get(&id) {
            Some(&i) => self.offsets[i]..self.offsets[i + 1],
            None => 0..0,
        };
        self.adjacency[range]
            .iter()
            .map(|&(n, w)| (self.nodes[n], w))
    }

    /// Weight of the edge between two nodes, if any.
    pub fn weight(&self, a: StationId, b: StationId) -> Option<f64> {
        self.neighbors(a).find(|(n, _)| *n == b).map(|(_, w)| w)
    }

    /// Dense index of a node; used by the path engine for per-query arrays.
    pub(crate) fn index_of(&self, id: StationId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Neighbours by dense index.
    pub(crate) fn neighbors_by_index(&self, i: usize) -> &[(usize, f64)] {
        &self.adjacency[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Node id at a dense index.
    pub(crate) fn id_at(&self, i: usize) -> StationId {
        self.nodes[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::edges::EdgeKind;

    fn id(n: u32) -> StationId {
        StationId::new(n)
    }

    fn edge(a: u32, b: u32, weight: f64) -> WeightedEdge {
        WeightedEdge {
            a: id(a),
            b: id(b),
            weight,
            kind: EdgeKind::Geometric,
        }
    }

    #[test]
    fn nodes_sorted_and_deduped() {
        let g = Graph::build([id(3), id(1), id(2), id(1)], &[]).unwrap();
        assert_eq!(g.nodes(), &[id(1), id(2), id(3)]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn neighbors_are_symmetric_and_sorted() {
        let g = Graph::build(
            [id(1), id(2), id(3)],
            &[edge(1, 3, 2.0), edge(1, 2, 1.0)],
        )
        .unwrap();

        let from_1: Vec<_> = g.neighbors(id(1)).collect();
        assert_eq!(from_1, vec![(id(2), 1.0), (id(3), 2.0)]);

        let from_3: Vec<_> = g.neighbors(id(3)).collect();
        assert_eq!(from_3, vec![(id(1), 2.0)]);
    }

    #[test]
    fn duplicate_edges_collapse_to_cheapest() {
        let g = Graph::build(
            [id(1), id(2)],
            &[edge(1, 2, 3.0), edge(2, 1, 3.0), edge(1, 2, 0.0)],
        )
        .unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(id(1), id(2)), Some(0.0));
        assert_eq!(g.neighbors(id(1)).count(), 1);
    }

    #[test]
    fn self_loops_dropped() {
        let g = Graph::build([id(1)], &[edge(1, 1, 1.0)]).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.neighbors(id(1)).count(), 0);
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let err = Graph::build([id(1)], &[edge(1, 9, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownEndpoint {
                a: id(1),
                b: id(9),
                missing: id(9)
            }
        );
    }

    #[test]
    fn negative_and_nan_weights_rejected() {
        assert!(matches!(
            Graph::build([id(1), id(2)], &[edge(1, 2, -1.0)]),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Graph::build([id(1), id(2)], &[edge(1, 2, f64::NAN)]),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Graph::build([id(1), id(2)], &[edge(1, 2, f64::INFINITY)]),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let g = Graph::build([id(1), id(2)], &[edge(1, 2, 1.0)]).unwrap();
        assert!(!g.contains(id(5)));
        assert_eq!(g.neighbors(id(5)).count(), 0);
        assert_eq!(g.weight(id(5), id(1)), None);
    }

    #[test]
    fn isolated_nodes_kept() {
        let g = Graph::build([id(1), id(2), id(3)], &[edge(1, 2, 1.0)]).unwrap();
        assert!(g.contains(id(3)));
        assert_eq!(g.neighbors(id(3)).count(), 0);
    }
}
