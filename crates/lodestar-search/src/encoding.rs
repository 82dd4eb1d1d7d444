//! Contracts for the externally supplied encoding machinery.
//!
//! The engine never looks inside a candidate test case. It sees an opaque
//! [`Encoding`] with an identity, a fitness record, an attached execution
//! trace and a mutation capability; fresh individuals come from an
//! [`EncodingSampler`], execution from an [`EncodingRunner`], recombination
//! from a [`Crossover`] operator.

use std::collections::HashMap;

use rand_chacha::ChaCha8Rng;

use lodestar_cfg::NodeId;

use crate::objective::ObjectiveId;
use crate::subject::SearchSubject;

/// Identity of an encoding. Equality of encodings is identity equality.
pub type EncodingId = u64;

/// What one execution of an encoding touched.
///
/// `executed` lists the graph nodes reached, in execution order.
/// `branch_distances` carries, per executed conditional node, how far the
/// observed condition value was from taking the other arm.
#[derive(Debug, Clone, Default)]
pub struct ExecutionTrace {
    pub executed: Vec<NodeId>,
    pub branch_distances: HashMap<NodeId, f64>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reached(&self, node: &NodeId) -> bool {
        self.executed.contains(node)
    }
}

/// Errors reported by the runner for a single encoding.
///
/// These are recoverable: the encoding is excluded from the generation's
/// survivors and from archive updates, and the search continues.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("execution of encoding {encoding} failed: {reason}")]
    Failed { encoding: EncodingId, reason: String },

    #[error("execution of encoding {encoding} timed out after {millis} ms")]
    Timeout { encoding: EncodingId, millis: u64 },
}

/// An opaque candidate test case.
///
/// Implementations own their genome; the engine only reads identity, size,
/// the fitness record and the execution trace, and clones encodings when
/// archiving them (copy-on-archive, so later mutation of a population member
/// cannot corrupt an archived best).
pub trait Encoding: Clone {
    /// Unique identity, stable for the lifetime of the individual.
    fn id(&self) -> EncodingId;

    /// Complexity measure used for tie-breaks; smaller is simpler.
    fn size(&self) -> usize;

    fn fitness(&self, objective: &ObjectiveId) -> Option<f64>;

    fn set_fitness(&mut self, objective: ObjectiveId, distance: f64);

    fn execution_trace(&self) -> Option<&ExecutionTrace>;

    fn set_execution_trace(&mut self, trace: ExecutionTrace);

    /// Produce a mutated copy. The sampler supports resampling mutation.
    fn mutate(
        &self,
        sampler: &mut dyn EncodingSampler<Self>,
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self;
}

/// Recorded distance to an objective, worst-case when not yet evaluated.
pub fn fitness_or_worst<E: Encoding>(encoding: &E, objective: &ObjectiveId) -> f64 {
    encoding.fitness(objective).unwrap_or(f64::INFINITY)
}

/// Source of fresh random individuals and resampled variables.
pub trait EncodingSampler<E: Encoding> {
    /// Sample a complete fresh individual.
    fn sample(&mut self, rng: &mut ChaCha8Rng) -> E;

    /// Sample a fresh variable of the given type, used by resampling
    /// mutation inside encodings.
    fn sample_variable(&mut self, depth: usize, ty: &str, rng: &mut ChaCha8Rng) -> E;
}

/// Executes an encoding against the subject and reports the raw trace.
pub trait EncodingRunner<E: Encoding> {
    fn execute(
        &mut self,
        subject: &dyn SearchSubject<E>,
        encoding: &E,
    ) -> Result<ExecutionTrace, ExecutionError>;
}

/// Recombines two parents into 0..=2 offspring.
pub trait Crossover<E: Encoding> {
    fn cross_over(&mut self, a: &E, b: &E, rng: &mut ChaCha8Rng) -> Vec<E>;
}
