//! Control flow graph types and JSON ingestion.
//!
//! Nodes and edges carry stable string identities assigned by the
//! instrumenter. An edge that represents one arm of a conditional carries a
//! `BranchKind`; unconditional edges carry none.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a control flow graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Which arm of a conditional an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    True,
    False,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKind::True => f.write_str("true"),
            BranchKind::False => f.write_str("false"),
        }
    }
}

/// A basic block in the control flow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Source line the block starts at.
    #[serde(default)]
    pub line: u32,
    /// Whether the block ends in a conditional.
    #[serde(default)]
    pub branch: bool,
}

/// A directed edge between two basic blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Present when this edge is one arm of a conditional.
    #[serde(default)]
    pub branch: Option<BranchKind>,
}

impl Edge {
    /// Shortest-path weight of this edge.
    ///
    /// Conditional arms cost 1, unconditional edges cost 2, so that pure
    /// control-reachability shortcuts do not dominate branch distance.
    pub fn weight(&self) -> u64 {
        if self.branch.is_some() {
            1
        } else {
            2
        }
    }
}

/// Errors raised by structural validation of a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("edge `{from}` -> `{to}` references undeclared node `{node}`")]
    MissingEndpoint {
        node: NodeId,
        from: NodeId,
        to: NodeId,
    },

    #[error("duplicate node id `{0}`")]
    DuplicateNode(NodeId),
}

/// Errors raised while ingesting a graph from JSON.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed graph: {0}")]
    Graph(#[from] GraphError),
}

/// The control flow graph of one search subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlFlowGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ControlFlowGraph {
    /// Parse and validate a graph from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let graph: ControlFlowGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Check structural soundness: unique node ids, edge endpoints declared.
    ///
    /// A violation is a fatal configuration error; the subject is malformed
    /// and must not enter the search.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint) {
                    return Err(GraphError::MissingEndpoint {
                        node: endpoint.clone(),
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Edges that represent conditional arms.
    pub fn branch_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.branch.is_some())
    }

    /// Outgoing edges of a node.
    pub fn outgoing(&self, id: &NodeId) -> Vec<&Edge> {
        self.edges.iter().filter(|e| &e.from == id).collect()
    }

    /// Adjacency as index lists, for shortest-path computation.
    pub(crate) fn adjacency(&self) -> (HashMap<&NodeId, usize>, Vec<Vec<(usize, u64)>>) {
        let index: HashMap<&NodeId, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (&n.id, i))
            .collect();

        let mut adjacent = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            let from = index[&edge.from];
            let to = index[&edge.to];
            adjacent[from].push((to, edge.weight()));
        }

        (index, adjacent)
    }
}
