//! All-pairs shortest-path oracle over a control flow graph.
//!
//! Built once per subject. Edge weights follow the branch-distance scheme:
//! conditional arms cost 1, unconditional edges cost 2. Paths follow edge
//! direction. Lookups for nodes that were never part of the graph fail
//! loudly; unreachable pairs are reported as an explicit error, never as a
//! silent default.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use rayon::prelude::*;

use crate::graph::{ControlFlowGraph, GraphError, NodeId};

/// Errors raised by path-distance lookups.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    #[error("node `{0}` is not part of the control flow graph")]
    UnknownNode(NodeId),

    #[error("no path from `{from}` to `{to}` in the control flow graph")]
    Unreachable { from: NodeId, to: NodeId },
}

/// Precomputed shortest-path weights between all node pairs.
#[derive(Debug, Clone)]
pub struct DistanceOracle {
    index: HashMap<NodeId, usize>,
    /// `weights[from][to]`, `None` when `to` is unreachable from `from`.
    weights: Vec<Vec<Option<u64>>>,
}

impl DistanceOracle {
    /// Validate the graph and run Dijkstra from every source node.
    ///
    /// Sources are independent, so they run on the rayon pool; the result is
    /// collected in node order and fully deterministic.
    pub fn from_graph(graph: &ControlFlowGraph) -> Result<Self, GraphError> {
        graph.validate()?;

        let (index, adjacency) = graph.adjacency();
        let index: HashMap<NodeId, usize> = index
            .into_iter()
            .map(|(id, i)| (id.clone(), i))
            .collect();

        let weights = (0..adjacency.len())
            .into_par_iter()
            .map(|source| dijkstra(source, &adjacency))
            .collect();

        Ok(Self { index, weights })
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Shortest-path weight from `from` to `to`.
    pub fn distance(&self, from: &NodeId, to: &NodeId) -> Result<f64, DistanceError> {
        let from_idx = self
            .index
            .get(from)
            .ok_or_else(|| DistanceError::UnknownNode(from.clone()))?;
        let to_idx = self
            .index
            .get(to)
            .ok_or_else(|| DistanceError::UnknownNode(to.clone()))?;

        match self.weights[*from_idx][*to_idx] {
            Some(weight) => Ok(weight as f64),
            None => Err(DistanceError::Unreachable {
                from: from.clone(),
                to: to.clone(),
            }),
        }
    }
}

/// Single-source Dijkstra over an index-based adjacency list.
fn dijkstra(source: usize, adjacency: &[Vec<(usize, u64)>]) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; adjacency.len()];
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((weight, node))) = heap.pop() {
        if dist[node] != Some(weight) {
            continue; // stale entry
        }
        for &(next, edge_weight) in &adjacency[node] {
            let candidate = weight + edge_weight;
            if dist[next].map_or(true, |d| candidate < d) {
                dist[next] = Some(candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BranchKind, Edge, Node};

    fn node(id: &str) -> Node {
        Node {
            id: NodeId::from(id),
            line: 0,
            branch: false,
        }
    }

    fn edge(from: &str, to: &str, branch: Option<BranchKind>) -> Edge {
        Edge {
            from: NodeId::from(from),
            to: NodeId::from(to),
            branch,
        }
    }

    /// entry -> cond -> {then, else}, then -> exit, else -> exit
    fn diamond() -> ControlFlowGraph {
        ControlFlowGraph {
            nodes: vec![node("entry"), node("cond"), node("then"), node("else"), node("exit")],
            edges: vec![
                edge("entry", "cond", None),
                edge("cond", "then", Some(BranchKind::True)),
                edge("cond", "else", Some(BranchKind::False)),
                edge("then", "exit", None),
                edge("else", "exit", None),
            ],
        }
    }

    #[test]
    fn test_conditional_edges_are_cheaper() {
        let oracle = DistanceOracle::from_graph(&diamond()).unwrap();

        // entry -> cond is unconditional (2), cond -> then is a branch arm (1).
        assert_eq!(
            oracle.distance(&NodeId::from("entry"), &NodeId::from("then")).unwrap(),
            3.0
        );
        assert_eq!(
            oracle.distance(&NodeId::from("cond"), &NodeId::from("then")).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let oracle = DistanceOracle::from_graph(&diamond()).unwrap();
        assert_eq!(
            oracle.distance(&NodeId::from("cond"), &NodeId::from("cond")).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_paths_follow_edge_direction() {
        let oracle = DistanceOracle::from_graph(&diamond()).unwrap();
        let err = oracle
            .distance(&NodeId::from("exit"), &NodeId::from("entry"))
            .unwrap_err();
        assert!(matches!(err, DistanceError::Unreachable { .. }));
    }

    #[test]
    fn test_unknown_node_fails_loudly() {
        let oracle = DistanceOracle::from_graph(&diamond()).unwrap();
        let err = oracle
            .distance(&NodeId::from("ghost"), &NodeId::from("exit"))
            .unwrap_err();
        assert!(matches!(err, DistanceError::UnknownNode(id) if id.as_str() == "ghost"));
    }

    #[test]
    fn test_shortest_path_prefers_branch_arms() {
        // Two unconditional hops a -> x -> b cost 4; the conditional route
        // a -> c -> b costs 2 and wins.
        let graph = ControlFlowGraph {
            nodes: vec![node("a"), node("b"), node("c"), node("x")],
            edges: vec![
                edge("a", "x", None),
                edge("x", "b", None),
                edge("a", "c", Some(BranchKind::True)),
                edge("c", "b", Some(BranchKind::False)),
            ],
        };
        let oracle = DistanceOracle::from_graph(&graph).unwrap();
        assert_eq!(
            oracle.distance(&NodeId::from("a"), &NodeId::from("b")).unwrap(),
            2.0
        );
    }

    #[test]
    fn test_malformed_graph_rejected_at_construction() {
        let graph = ControlFlowGraph {
            nodes: vec![node("a")],
            edges: vec![edge("a", "ghost", None)],
        };
        assert!(DistanceOracle::from_graph(&graph).is_err());
    }
}
