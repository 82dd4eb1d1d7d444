//! The metaheuristic family.
//!
//! One generic evolutionary driver ([`GeneticAlgorithm`]) owns the loop and
//! the run state machine; the algorithm variants differ only in their
//! environmental-selection strategy, supplied as a [`ReplacementStrategy`]
//! object. Composed variants ([`MultiGa`], [`Comix`]) run several drivers
//! and merge their archives.

pub mod comix;
pub mod genetic;
pub mod mosa;
pub mod multi;
pub mod nsga2;
pub mod simple;

pub use comix::Comix;
pub use genetic::GeneticAlgorithm;
pub use mosa::{mosa, MosaReplacement};
pub use multi::MultiGa;
pub use nsga2::{nsga2, Nsga2Replacement};
pub use simple::{simple_ga, EliteReplacement};

use rand_chacha::ChaCha8Rng;

use crate::config::ConfigError;
use crate::encoding::Encoding;
use crate::objective::{ObjectiveId, ObjectiveManager};

/// Lifecycle of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Created,
    InitializationStarted,
    InitializationStopped,
    SearchStarted,
    SearchStopped,
}

/// Fatal search errors. Evaluation failures are not among them; those are
/// recovered per encoding and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "environmental selection ({strategy}) returned {actual} survivors, expected {expected}"
    )]
    WrongPopulationSize {
        expected: usize,
        actual: usize,
        strategy: &'static str,
    },

    #[error("front partition ({strategy}) covered {covered} of {expected} candidates")]
    BrokenFrontPartition {
        covered: usize,
        expected: usize,
        strategy: &'static str,
    },

    #[error("generation {generation} on subject `{subject}`: {source}")]
    Generation {
        generation: u64,
        subject: String,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Attach generation context to a fatal error.
    pub fn at_generation(self, generation: u64, subject: &str) -> Self {
        SearchError::Generation {
            generation,
            subject: subject.to_string(),
            source: Box::new(self),
        }
    }
}

/// Environmental selection: which candidates survive into the next
/// generation.
///
/// Must return exactly `target_size` survivors; returning anything else is
/// an invariant violation the driver treats as fatal — never truncate or pad
/// silently.
pub trait ReplacementStrategy<E: Encoding> {
    fn name(&self) -> &'static str;

    /// Objectives parent ranking should be computed on.
    fn ranking_objectives(&self, manager: &ObjectiveManager<E>) -> Vec<ObjectiveId> {
        manager.all_ids()
    }

    fn select_survivors(
        &self,
        candidates: &[E],
        manager: &ObjectiveManager<E>,
        target_size: usize,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<E>, SearchError>;
}

/// Shared front-filling used by the Pareto-based strategies: admit whole
/// fronts while they fit, then truncate the boundary front by crowding
/// distance, descending, with a stable sort so ties keep insertion order.
pub(crate) fn fill_by_fronts<E: Encoding>(
    candidates: &[E],
    fronts: &[Vec<usize>],
    objectives: &[ObjectiveId],
    target_size: usize,
) -> Vec<E> {
    use crate::operators::crowding_distances;

    let mut survivors: Vec<E> = Vec::with_capacity(target_size);
    for front in fronts {
        let remaining = target_size - survivors.len();
        if remaining == 0 {
            break;
        }

        if front.len() <= remaining {
            survivors.extend(front.iter().map(|&i| candidates[i].clone()));
            continue;
        }

        let crowding = crowding_distances(candidates, front, objectives);
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| crowding[b].total_cmp(&crowding[a]));
        survivors.extend(
            order[..remaining]
                .iter()
                .map(|&pos| candidates[front[pos]].clone()),
        );
    }

    survivors
}
