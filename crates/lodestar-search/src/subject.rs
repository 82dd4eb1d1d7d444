//! Search subjects.
//!
//! A subject owns its control flow graph and the objectives derived from it.
//! Objective extraction is subject-type specific; [`BranchCoverageSubject`]
//! is the branch-coverage flavor: one objective per conditional arm.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lodestar_cfg::{ControlFlowGraph, DistanceError, DistanceOracle, GraphError, NodeId};

use crate::encoding::Encoding;
use crate::objective::{BranchObjective, ObjectiveFunction, ObjectiveId};

/// Callable unit of the subject, as reported by the instrumenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Graph node where the function body starts.
    pub entry: NodeId,
    #[serde(default)]
    pub visibility: String,
}

/// Function name -> descriptor.
pub type FunctionMap = HashMap<String, FunctionDescriptor>;

/// Subject of the search process.
pub trait SearchSubject<E: Encoding>: Send + Sync {
    fn name(&self) -> &str;

    /// All structural objectives of this subject, in stable order.
    fn objectives(&self) -> Vec<Arc<dyn ObjectiveFunction<E>>>;

    /// Objectives graph-adjacent to the given one, used to seed dynamic
    /// search heuristics once the parent is covered.
    fn child_objectives(&self, objective: &ObjectiveId) -> Vec<Arc<dyn ObjectiveFunction<E>>>;

    /// Precomputed shortest-path weight between two graph nodes.
    fn path_distance(&self, from: &NodeId, to: &NodeId) -> Result<f64, DistanceError>;
}

/// Branch-coverage subject: one objective per conditional arm of the graph.
pub struct BranchCoverageSubject<E: Encoding> {
    name: String,
    graph: ControlFlowGraph,
    oracle: Arc<DistanceOracle>,
    functions: FunctionMap,
    objectives: BTreeMap<ObjectiveId, Arc<dyn ObjectiveFunction<E>>>,
    children: BTreeMap<ObjectiveId, Vec<ObjectiveId>>,
}

impl<E: Encoding> BranchCoverageSubject<E> {
    /// Build the subject from an already-validated graph and function map.
    ///
    /// Graph validation failures are fatal configuration errors; the search
    /// must not start on a malformed subject.
    pub fn new(
        name: impl Into<String>,
        graph: ControlFlowGraph,
        functions: FunctionMap,
    ) -> Result<Self, GraphError> {
        let name = name.into();
        let oracle = Arc::new(DistanceOracle::from_graph(&graph)?);

        let mut objectives: BTreeMap<ObjectiveId, Arc<dyn ObjectiveFunction<E>>> = BTreeMap::new();
        let mut targets: Vec<(ObjectiveId, NodeId)> = Vec::new();
        for edge in graph.branch_edges() {
            let Some(kind) = edge.branch else { continue };
            let id = ObjectiveId::new(format!("{name}:{}->{}:{kind}", edge.from, edge.to));
            objectives.insert(
                id.clone(),
                Arc::new(BranchObjective::new(
                    id.clone(),
                    name.clone(),
                    edge.to.clone(),
                    Arc::clone(&oracle),
                )),
            );
            targets.push((id, edge.to.clone()));
        }

        let mut children = BTreeMap::new();
        for (id, target) in &targets {
            children.insert(id.clone(), reachable_branch_objectives(&graph, target, &name));
        }

        Ok(Self {
            name,
            graph,
            oracle,
            functions,
            objectives,
            children,
        })
    }

    pub fn graph(&self) -> &ControlFlowGraph {
        &self.graph
    }

    pub fn functions(&self) -> &FunctionMap {
        &self.functions
    }
}

/// First conditional arms reachable from `start` without passing another
/// conditional arm: those are the next decisions the search unlocks.
fn reachable_branch_objectives(
    graph: &ControlFlowGraph,
    start: &NodeId,
    subject: &str,
) -> Vec<ObjectiveId> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([start.clone()]);
    let mut visited = vec![start.clone()];

    while let Some(node) = queue.pop_front() {
        for edge in graph.outgoing(&node) {
            if let Some(kind) = edge.branch {
                found.push(ObjectiveId::new(format!(
                    "{subject}:{}->{}:{kind}",
                    edge.from, edge.to
                )));
            } else if !visited.contains(&edge.to) {
                visited.push(edge.to.clone());
                queue.push_back(edge.to.clone());
            }
        }
    }

    found.sort();
    found.dedup();
    found
}

impl<E: Encoding> SearchSubject<E> for BranchCoverageSubject<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn objectives(&self) -> Vec<Arc<dyn ObjectiveFunction<E>>> {
        self.objectives.values().cloned().collect()
    }

    fn child_objectives(&self, objective: &ObjectiveId) -> Vec<Arc<dyn ObjectiveFunction<E>>> {
        self.children
            .get(objective)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.objectives.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn path_distance(&self, from: &NodeId, to: &NodeId) -> Result<f64, DistanceError> {
        self.oracle.distance(from, to)
    }
}
