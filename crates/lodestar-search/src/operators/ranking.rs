//! Fast non-dominated sorting and crowding distance.
//!
//! Both operate on population indices so callers can keep encodings where
//! they are. Distances are read from each encoding's fitness record; an
//! objective an encoding was never scored on counts as worst-case.

use crate::encoding::{fitness_or_worst, Encoding};
use crate::objective::ObjectiveId;

/// Front rank and crowding score of one population member.
#[derive(Debug, Clone, Copy)]
pub struct FrontRank {
    /// 0 is the best front.
    pub rank: usize,
    /// Larger is more diverse, boundary members are infinite.
    pub crowding: f64,
}

/// Pareto domination: `a` is no worse than `b` on every objective and
/// strictly better on at least one (lower distance is better). Equal
/// vectors dominate neither way.
pub fn dominates<E: Encoding>(a: &E, b: &E, objectives: &[ObjectiveId]) -> bool {
    let mut strictly_better = false;
    for objective in objectives {
        let da = fitness_or_worst(a, objective);
        let db = fitness_or_worst(b, objective);
        if da > db {
            return false;
        }
        if da < db {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Partition a population into ordered Pareto fronts (NSGA-II).
///
/// Returns population indices; the union of the fronts is the input set
/// exactly once and fronts are pairwise disjoint.
pub fn fast_non_dominated_sort<E: Encoding>(
    population: &[E],
    objectives: &[ObjectiveId],
) -> Vec<Vec<usize>> {
    let all: Vec<usize> = (0..population.len()).collect();
    fast_non_dominated_sort_within(population, &all, objectives)
}

/// Non-dominated sorting restricted to a subset of population indices.
///
/// Used by preference sorting, which pre-assigns some members to front 0.
pub fn fast_non_dominated_sort_within<E: Encoding>(
    population: &[E],
    subset: &[usize],
    objectives: &[ObjectiveId],
) -> Vec<Vec<usize>> {
    if subset.is_empty() {
        return Vec::new();
    }

    let n = subset.len();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let a = &population[subset[i]];
            let b = &population[subset[j]];
            if dominates(a, b, objectives) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(b, a, objectives) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current.iter().map(|&i| subset[i]).collect());
        current = next;
    }

    debug_assert_eq!(fronts.iter().map(Vec::len).sum::<usize>(), subset.len());
    fronts
}

/// Crowding distances for one front, parallel to `front`'s order.
///
/// Boundary members per objective get an infinite score; interior members
/// accumulate the normalized gap between their neighbors. An objective with
/// zero (or non-finite) range across the front contributes exactly 0.
pub fn crowding_distances<E: Encoding>(
    population: &[E],
    front: &[usize],
    objectives: &[ObjectiveId],
) -> Vec<f64> {
    let mut scores = vec![0.0f64; front.len()];
    if front.len() <= 2 {
        return vec![f64::INFINITY; front.len()];
    }

    for objective in objectives {
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| {
            fitness_or_worst(&population[front[a]], objective)
                .total_cmp(&fitness_or_worst(&population[front[b]], objective))
        });

        let first = order[0];
        let last = order[order.len() - 1];
        let min = fitness_or_worst(&population[front[first]], objective);
        let max = fitness_or_worst(&population[front[last]], objective);
        let range = max - min;

        scores[first] = f64::INFINITY;
        scores[last] = f64::INFINITY;

        if range == 0.0 || !range.is_finite() {
            continue;
        }

        for window in order.windows(3) {
            let (prev, mid, next) = (window[0], window[1], window[2]);
            if scores[mid].is_finite() {
                let gap = fitness_or_worst(&population[front[next]], objective)
                    - fitness_or_worst(&population[front[prev]], objective);
                scores[mid] += gap / range;
            }
        }
    }

    scores
}

/// Rank a whole population: front index plus within-front crowding.
pub fn rank_population<E: Encoding>(
    population: &[E],
    objectives: &[ObjectiveId],
) -> Vec<FrontRank> {
    let mut ranks = vec![
        FrontRank {
            rank: 0,
            crowding: 0.0,
        };
        population.len()
    ];

    for (front_index, front) in fast_non_dominated_sort(population, objectives)
        .iter()
        .enumerate()
    {
        let crowding = crowding_distances(population, front, objectives);
        for (&member, &score) in front.iter().zip(crowding.iter()) {
            ranks[member] = FrontRank {
                rank: front_index,
                crowding: score,
            };
        }
    }

    ranks
}
