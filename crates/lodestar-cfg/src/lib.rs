//! Control-flow-graph data model and distance oracle.
//!
//! A subject's control flow graph arrives as prebuilt data (the instrumenter
//! that produces it lives outside this workspace). This crate parses and
//! validates that data and precomputes the all-pairs shortest-path weights
//! the search engine uses to score how close an execution came to an
//! uncovered branch.

pub mod distance;
pub mod graph;

pub use distance::{DistanceError, DistanceOracle};
pub use graph::{BranchKind, ControlFlowGraph, Edge, GraphError, Node, NodeId, ParseError};
