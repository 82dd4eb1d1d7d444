//! Single-objective elitist GA.
//!
//! Fitness is the scalar sum of objective distances; environmental selection
//! keeps the best N candidates, stable on ties.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use crate::config::SearchConfig;
use crate::encoding::{fitness_or_worst, Crossover, Encoding, EncodingSampler};
use crate::metaheuristics::{GeneticAlgorithm, ReplacementStrategy, SearchError};
use crate::objective::{ObjectiveId, ObjectiveManager};
use crate::subject::SearchSubject;

/// Scalar fitness: summed distance over the given objectives, lower is
/// better.
pub fn scalar_fitness<E: Encoding>(encoding: &E, objectives: &[ObjectiveId]) -> f64 {
    objectives
        .iter()
        .map(|objective| fitness_or_worst(encoding, objective))
        .sum()
}

pub struct EliteReplacement;

impl<E: Encoding> ReplacementStrategy<E> for EliteReplacement {
    fn name(&self) -> &'static str {
        "simple-ga"
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
                strategy: "simple-ga",
            });
        }

        let objectives = manager.all_ids();
        let fitness: Vec<f64> = candidates
            .iter()
            .map(|candidate| scalar_fitness(candidate, &objectives))
            .collect();
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        Ok(order[..target_size]
            .iter()
            .map(|&i| candidates[i].clone())
            .collect())
    }
}

/// Construct a single-objective elitist search.
pub fn simple_ga<E: Encoding>(
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
        Box::new(EliteReplacement),
    )
}
