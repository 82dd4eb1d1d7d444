//! MOSA: many-objective sorting tailored to coverage.
//!
//! Two departures from NSGA-II:
//! - **Preference criterion**: per uncovered objective, the single best
//!   encoding (ties broken by smaller size) is promoted into front 0
//!   regardless of Pareto dominance, so every open objective keeps a
//!   champion alive.
//! - Dominance is computed over the *uncovered* objective subspace only;
//!   covered objectives no longer steer the search.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use crate::config::SearchConfig;
use crate::encoding::{fitness_or_worst, Crossover, Encoding, EncodingSampler};
use crate::metaheuristics::{fill_by_fronts, GeneticAlgorithm, ReplacementStrategy, SearchError};
use crate::objective::{ObjectiveId, ObjectiveManager};
use crate::operators::ranking::fast_non_dominated_sort_within;
use crate::subject::SearchSubject;

/// Front 0 of the preference criterion: the champion per objective.
///
/// For each objective, the index with the minimum distance; ties go to the
/// smaller encoding, then to the earlier index. Result preserves first-win
/// order and holds each index at most once.
pub fn preference_criterion<E: Encoding>(
    candidates: &[E],
    objectives: &[ObjectiveId],
) -> Vec<usize> {
    let mut champions = Vec::new();

    for objective in objectives {
        let mut best: Option<usize> = None;
        for (index, encoding) in candidates.iter().enumerate() {
            let Some(current) = best else {
                best = Some(index);
                continue;
            };
            let d = fitness_or_worst(encoding, objective);
            let d_best = fitness_or_worst(&candidates[current], objective);
            if d < d_best || (d == d_best && encoding.size() < candidates[current].size()) {
                best = Some(index);
            }
        }
        if let Some(champion) = best {
            if !champions.contains(&champion) {
                champions.push(champion);
            }
        }
    }

    champions
}

/// The non-dominated front over the given objective subspace.
pub fn non_dominated_front<E: Encoding>(
    candidates: &[E],
    objectives: &[ObjectiveId],
) -> Vec<usize> {
    let all: Vec<usize> = (0..candidates.len()).collect();
    fast_non_dominated_sort_within(candidates, &all, objectives)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Preference criterion front, then ordinary non-dominated sorting of the
/// remainder, all restricted to the uncovered objectives.
///
/// The union of the returned fronts is the input exactly once.
pub fn preference_sorting<E: Encoding>(
    candidates: &[E],
    objectives: &[ObjectiveId],
) -> Vec<Vec<usize>> {
    if candidates.is_empty() {
        return Vec::new();
    }
    if objectives.is_empty() {
        return vec![(0..candidates.len()).collect()];
    }

    let champions = preference_criterion(candidates, objectives);
    let rest: Vec<usize> = (0..candidates.len())
        .filter(|i| !champions.contains(i))
        .collect();

    let mut fronts = vec![champions];
    fronts.extend(fast_non_dominated_sort_within(candidates, &rest, objectives));
    fronts
}

pub struct MosaReplacement;

impl<E: Encoding> ReplacementStrategy<E> for MosaReplacement {
    fn name(&self) -> &'static str {
        "mosa"
    }

    /// Parents are ranked on what remains to be covered.
    fn ranking_objectives(&self, manager: &ObjectiveManager<E>) -> Vec<ObjectiveId> {
        let uncovered = manager.uncovered_ids();
        if uncovered.is_empty() {
            manager.all_ids()
        } else {
            uncovered
        }
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
                strategy: "mosa",
            });
        }

        let objectives = self.ranking_objectives(manager);
        let fronts = preference_sorting(candidates, &objectives);

        let covered: usize = fronts.iter().map(Vec::len).sum();
        if covered != candidates.len() {
            return Err(SearchError::BrokenFrontPartition {
                covered,
                expected: candidates.len(),
                strategy: "mosa",
            });
        }

        Ok(fill_by_fronts(candidates, &fronts, &objectives, target_size))
    }
}

/// Construct a MOSA search.
pub fn mosa<E: Encoding>(
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
        Box::new(MosaReplacement),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::testutil::{ids, vectors};

    #[test]
    fn test_preference_criterion_keeps_one_champion_per_objective() {
        let objectives = ids(&["o1", "o2"]);
        let pop = vectors(&[&[2.0, 3.0], &[0.0, 2.0], &[2.0, 0.0]]);

        let front = preference_criterion(&pop, &objectives);

        assert_eq!(front.len(), 2);
        assert!(front.contains(&1));
        assert!(front.contains(&2));
    }

    #[test]
    fn test_preference_criterion_ties_go_to_smaller_encoding() {
        let objectives = ids(&["o1"]);
        let mut pop = vectors(&[&[1.0], &[1.0]]);
        pop[0].size = 9;
        pop[1].size = 2;

        assert_eq!(preference_criterion(&pop, &objectives), vec![1]);
    }

    #[test]
    fn test_shared_champion_is_not_duplicated() {
        let objectives = ids(&["o1", "o2"]);
        let pop = vectors(&[&[0.0, 0.0], &[3.0, 3.0]]);

        assert_eq!(preference_criterion(&pop, &objectives), vec![0]);
    }

    #[test]
    fn test_non_dominated_front_over_uncovered_subspace() {
        let objectives = ids(&["o1", "o2"]);
        let pop = vectors(&[
            &[2.0, 3.0],
            &[0.0, 2.0],
            &[2.0, 0.0],
            &[1.0, 1.0],
            &[5.0, 5.0],
        ]);

        let mut front = non_dominated_front(&pop, &objectives);
        front.sort();

        assert_eq!(front, vec![1, 2, 3]);
    }

    #[test]
    fn test_preference_sorting_front_layout() {
        let objectives = ids(&["o1", "o2"]);
        let pop = vectors(&[&[2.0, 3.0], &[0.0, 2.0], &[2.0, 0.0], &[1.0, 1.0]]);

        let fronts = preference_sorting(&pop, &objectives);

        assert_eq!(fronts.len(), 3);
        let mut front0 = fronts[0].clone();
        front0.sort();
        assert_eq!(front0, vec![1, 2]);
        assert_eq!(fronts[1], vec![3]);
        assert_eq!(fronts[2], vec![0]);
    }

    #[test]
    fn test_preference_sorting_covers_input_exactly_once() {
        let objectives = ids(&["o1", "o2"]);
        let pop = vectors(&[
            &[2.0, 3.0],
            &[0.0, 2.0],
            &[2.0, 0.0],
            &[1.0, 1.0],
            &[5.0, 5.0],
            &[1.0, 4.0],
        ]);

        let fronts = preference_sorting(&pop, &objectives);

        let mut seen: Vec<usize> = fronts.iter().flatten().copied().collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_open_objectives_collapses_to_single_front() {
        let pop = vectors(&[&[1.0], &[2.0]]);
        let fronts = preference_sorting(&pop, &[]);
        assert_eq!(fronts, vec![vec![0, 1]]);
    }
}
