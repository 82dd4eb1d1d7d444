mod common;

use common::{DummyEncoding, DummyRunner, PresetSubject};

use lodestar_search::metaheuristics::mosa::{
    non_dominated_front, preference_criterion, preference_sorting, MosaReplacement,
};
use lodestar_search::metaheuristics::ReplacementStrategy;
use lodestar_search::objective::ObjectiveManager;
use lodestar_search::rng::seeded_rng;
use lodestar_search::{Encoding, ObjectiveId};

fn objectives() -> Vec<ObjectiveId> {
    vec![ObjectiveId::from("o1"), ObjectiveId::from("o2")]
}

fn individual(tag: u64, distances: [f64; 2]) -> DummyEncoding {
    DummyEncoding::with_evaluation(
        vec![tag],
        &[("o1", distances[0]), ("o2", distances[1])],
    )
}

#[test]
fn test_preference_criterion() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
    ];

    let front_zero = preference_criterion(&population, &objectives());

    assert_eq!(front_zero.len(), 2);
    assert!(front_zero.contains(&1));
    assert!(front_zero.contains(&2));
    assert!(!front_zero.contains(&0));
}

#[test]
fn test_non_dominated_front() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
        individual(3, [1.0, 1.0]),
        individual(4, [5.0, 5.0]),
    ];

    let mut front = non_dominated_front(&population, &objectives());
    front.sort();

    assert_eq!(front, vec![1, 2, 3]);
}

#[test]
fn test_preference_sorting() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
        individual(3, [1.0, 1.0]),
    ];

    let fronts = preference_sorting(&population, &objectives());

    assert_eq!(fronts.len(), 3);

    let mut front_zero = fronts[0].clone();
    front_zero.sort();
    assert_eq!(front_zero, vec![1, 2]);
    assert_eq!(fronts[1], vec![3]);
    assert_eq!(fronts[2], vec![0]);
}

#[test]
fn test_preference_sorting_is_exact_cover() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
        individual(3, [1.0, 1.0]),
        individual(4, [5.0, 5.0]),
        individual(5, [3.0, 2.0]),
    ];

    let fronts = preference_sorting(&population, &objectives());

    let mut seen: Vec<usize> = fronts.iter().flatten().copied().collect();
    seen.sort();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_environmental_selection() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
        individual(3, [1.0, 1.0]),
        individual(4, [3.0, 2.0]),
    ];

    let subject = PresetSubject::new(&["o1", "o2"]);
    let mut manager = ObjectiveManager::new(Box::new(DummyRunner));
    manager.update_objectives(&subject);

    let mut rng = seeded_rng(1);
    let survivors = MosaReplacement
        .select_survivors(&population, &manager, 4, &mut rng)
        .unwrap();

    assert_eq!(survivors.len(), 4);
    let mut ids: Vec<u64> = survivors.iter().map(|e| e.id()).collect();
    ids.sort();
    let mut expected: Vec<u64> = population[..4].iter().map(|e| e.id()).collect();
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn test_environmental_selection_returns_exact_size_for_all_targets() {
    let population = vec![
        individual(0, [2.0, 3.0]),
        individual(1, [0.0, 2.0]),
        individual(2, [2.0, 0.0]),
        individual(3, [1.0, 1.0]),
        individual(4, [3.0, 2.0]),
        individual(5, [5.0, 5.0]),
    ];

    let subject = PresetSubject::new(&["o1", "o2"]);
    let mut manager = ObjectiveManager::new(Box::new(DummyRunner));
    manager.update_objectives(&subject);

    let mut rng = seeded_rng(1);
    for size in 1..=population.len() {
        let survivors = MosaReplacement
            .select_survivors(&population, &manager, size, &mut rng)
            .unwrap();
        assert_eq!(survivors.len(), size);
    }
}
