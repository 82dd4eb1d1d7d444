//! NSGA-II.
//!
//! Environmental selection: fast non-dominated sort over parents plus
//! offspring on the full objective space, fill front by front, truncate the
//! boundary front by crowding distance descending.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use crate::config::SearchConfig;
use crate::encoding::{Crossover, Encoding, EncodingSampler};
use crate::metaheuristics::{fill_by_fronts, GeneticAlgorithm, ReplacementStrategy, SearchError};
use crate::objective::ObjectiveManager;
use crate::operators::fast_non_dominated_sort;
use crate::subject::SearchSubject;

pub struct Nsga2Replacement;

impl<E: Encoding> ReplacementStrategy<E> for Nsga2Replacement {
    fn name(&self) -> &'static str {
        "nsga2"
    }

    fn select_survivors(
        &self,
        candidates: &[E],
        manager: &ObjectiveManager<E>,
        target_size: usize,
        _rng: &mut ChaCha8Rng,
    ) -> Result<Vec<E>, SearchError> {
        if candidates.len() < target_size {
            return Err(SearchError::WrongPopulationSize {
                expected: target_size,
                actual: candidates.len(),
                strategy: "nsga2",
            });
        }

        let objectives = manager.all_ids();
        let fronts = fast_non_dominated_sort(candidates, &objectives);

        let covered: usize = fronts.iter().map(Vec::len).sum();
        if covered != candidates.len() {
            return Err(SearchError::BrokenFrontPartition {
                covered,
                expected: candidates.len(),
                strategy: "nsga2",
            });
        }

        Ok(fill_by_fronts(candidates, &fronts, &objectives, target_size))
    }
}

/// Construct an NSGA-II search.
pub fn nsga2<E: Encoding>(
    config: SearchConfig,
    subject: Arc<dyn SearchSubject<E>>,
    manager: ObjectiveManager<E>,
    sampler: Box<dyn EncodingSampler<E>>,
    crossover: Box<dyn Crossover<E>>,
) -> Result<GeneticAlgorithm<E>, SearchError> {
    GeneticAlgorithm::new(
        config,
        subject,
        manager,
        sampler,
        crossover,
        Box::new(Nsga2Replacement),
    )
}
