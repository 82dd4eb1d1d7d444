//! Branch coverage objective.
//!
//! Distance combines the approach level (precomputed shortest-path weight
//! from the closest executed node to the target) with the normalized local
//! branch distance observed at that closest node.

use std::sync::Arc;

use lodestar_cfg::{DistanceError, DistanceOracle, NodeId};

use crate::encoding::Encoding;
use crate::objective::{ObjectiveFunction, ObjectiveId};

/// Objective: take one conditional arm, landing on `target`.
#[derive(Debug, Clone)]
pub struct BranchObjective {
    id: ObjectiveId,
    subject: String,
    target: NodeId,
    oracle: Arc<DistanceOracle>,
}

impl BranchObjective {
    pub fn new(
        id: ObjectiveId,
        subject: impl Into<String>,
        target: NodeId,
        oracle: Arc<DistanceOracle>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            target,
            oracle,
        }
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }
}

/// Map a raw branch distance into [0, 1).
fn normalize(distance: f64) -> f64 {
    distance / (distance + 1.0)
}

impl<E: Encoding> ObjectiveFunction<E> for BranchObjective {
    fn id(&self) -> &ObjectiveId {
        &self.id
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn distance(&self, encoding: &E) -> f64 {
        let Some(trace) = encoding.execution_trace() else {
            return f64::INFINITY;
        };

        // Closest executed node by precomputed path weight.
        let mut approach = f64::INFINITY;
        let mut closest: Option<&NodeId> = None;
        for node in &trace.executed {
            match self.oracle.distance(node, &self.target) {
                Ok(d) if d < approach => {
                    approach = d;
                    closest = Some(node);
                }
                Ok(_) => {}
                Err(DistanceError::Unreachable { .. }) => {}
                Err(DistanceError::UnknownNode(id)) => {
                    // Runner reported a node the graph never declared; not
                    // fatal, but worth surfacing.
                    log::warn!(
                        "objective {}: trace node `{id}` unknown to the control flow graph",
                        self.id
                    );
                }
            }
        }

        let Some(closest) = closest else {
            return f64::INFINITY;
        };

        if approach == 0.0 {
            return 0.0; // target node executed
        }

        let local = trace
            .branch_distances
            .get(closest)
            .copied()
            .map(normalize)
            .unwrap_or(1.0);

        approach + local
    }
}
