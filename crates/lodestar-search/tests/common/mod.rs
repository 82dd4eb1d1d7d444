//! Shared mocks for integration tests: a genome-vector encoding, a subject
//! whose objectives are "contain the value t", and the matching sampler,
//! runner and crossover.

// Not every test binary uses every mock.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use lodestar_cfg::{DistanceError, NodeId};
use lodestar_search::{
    Crossover, Encoding, EncodingRunner, EncodingSampler, ExecutionError, ExecutionTrace,
    ObjectiveFunction, ObjectiveId, SearchSubject,
};

pub const GENE_MAX: u64 = 5;
pub const GENOME_LEN: usize = 6;

/// Test encoding: a small vector of genes in `0..=GENE_MAX`.
#[derive(Debug, Clone)]
pub struct DummyEncoding {
    pub genome: Vec<u64>,
    fitness: HashMap<ObjectiveId, f64>,
    trace: Option<ExecutionTrace>,
}

impl DummyEncoding {
    pub fn new(genome: Vec<u64>) -> Self {
        Self {
            genome,
            fitness: HashMap::new(),
            trace: None,
        }
    }

    /// Preset distances, for operator-level tests that skip the runner.
    pub fn with_evaluation(genome: Vec<u64>, distances: &[(&str, f64)]) -> Self {
        let mut encoding = Self::new(genome);
        for (id, d) in distances {
            encoding.fitness.insert(ObjectiveId::from(*id), *d);
        }
        encoding
    }
}

impl Encoding for DummyEncoding {
    fn id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.genome.hash(&mut hasher);
        hasher.finish()
    }

    fn size(&self) -> usize {
        self.genome.len()
    }

    fn fitness(&self, objective: &ObjectiveId) -> Option<f64> {
        self.fitness.get(objective).copied()
    }

    fn set_fitness(&mut self, objective: ObjectiveId, distance: f64) {
        self.fitness.insert(objective, distance);
    }

    fn execution_trace(&self) -> Option<&ExecutionTrace> {
        self.trace.as_ref()
    }

    fn set_execution_trace(&mut self, trace: ExecutionTrace) {
        self.trace = Some(trace);
    }

    fn mutate(
        &self,
        _sampler: &mut dyn EncodingSampler<Self>,
        _depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut genome = self.genome.clone();
        if !genome.is_empty() {
            let position = rng.gen_range(0..genome.len());
            genome[position] = rng.gen_range(0..=GENE_MAX);
        }
        Self::new(genome)
    }
}

/// Objective "the genome contains `target`"; distance is how far the closest
/// gene is from it.
pub struct ValueObjective {
    id: ObjectiveId,
    target: u64,
}

impl ValueObjective {
    pub fn new(target: u64) -> Self {
        Self {
            id: ObjectiveId::new(format!("value:{target}")),
            target,
        }
    }
}

impl ObjectiveFunction<DummyEncoding> for ValueObjective {
    fn id(&self) -> &ObjectiveId {
        &self.id
    }

    fn subject(&self) -> &str {
        "dummy"
    }

    fn distance(&self, encoding: &DummyEncoding) -> f64 {
        encoding
            .genome
            .iter()
            .map(|&gene| gene.abs_diff(self.target))
            .min()
            .unwrap_or(u64::MAX) as f64
    }
}

/// Subject with one [`ValueObjective`] per target value.
pub struct DummySubject {
    targets: Vec<u64>,
}

impl DummySubject {
    pub fn new(targets: &[u64]) -> Self {
        Self {
            targets: targets.to_vec(),
        }
    }
}

impl SearchSubject<DummyEncoding> for DummySubject {
    fn name(&self) -> &str {
        "dummy"
    }

    fn objectives(&self) -> Vec<Arc<dyn ObjectiveFunction<DummyEncoding>>> {
        self.targets
            .iter()
            .map(|&t| Arc::new(ValueObjective::new(t)) as Arc<dyn ObjectiveFunction<DummyEncoding>>)
            .collect()
    }

    fn child_objectives(
        &self,
        _objective: &ObjectiveId,
    ) -> Vec<Arc<dyn ObjectiveFunction<DummyEncoding>>> {
        Vec::new()
    }

    fn path_distance(&self, from: &NodeId, _to: &NodeId) -> Result<f64, DistanceError> {
        Err(DistanceError::UnknownNode(from.clone()))
    }
}

/// Runner that always succeeds with an empty trace; the value objectives
/// score the genome directly.
pub struct DummyRunner;

impl EncodingRunner<DummyEncoding> for DummyRunner {
    fn execute(
        &mut self,
        _subject: &dyn SearchSubject<DummyEncoding>,
        _encoding: &DummyEncoding,
    ) -> Result<ExecutionTrace, ExecutionError> {
        Ok(ExecutionTrace::new())
    }
}

pub struct DummySampler;

impl EncodingSampler<DummyEncoding> for DummySampler {
    fn sample(&mut self, rng: &mut ChaCha8Rng) -> DummyEncoding {
        let genome = (0..GENOME_LEN).map(|_| rng.gen_range(0..=GENE_MAX)).collect();
        DummyEncoding::new(genome)
    }

    fn sample_variable(&mut self, _depth: usize, _ty: &str, rng: &mut ChaCha8Rng) -> DummyEncoding {
        self.sample(rng)
    }
}

/// Objective that reads whatever distance was preset on the encoding.
pub struct PresetObjective(pub ObjectiveId);

impl ObjectiveFunction<DummyEncoding> for PresetObjective {
    fn id(&self) -> &ObjectiveId {
        &self.0
    }

    fn subject(&self) -> &str {
        "preset"
    }

    fn distance(&self, encoding: &DummyEncoding) -> f64 {
        encoding.fitness(&self.0).unwrap_or(f64::INFINITY)
    }
}

/// Subject exposing preset objectives by name, for operator-level tests.
pub struct PresetSubject {
    ids: Vec<ObjectiveId>,
}

impl PresetSubject {
    pub fn new(names: &[&str]) -> Self {
        Self {
            ids: names.iter().map(|n| ObjectiveId::from(*n)).collect(),
        }
    }
}

impl SearchSubject<DummyEncoding> for PresetSubject {
    fn name(&self) -> &str {
        "preset"
    }

    fn objectives(&self) -> Vec<Arc<dyn ObjectiveFunction<DummyEncoding>>> {
        self.ids
            .iter()
            .map(|id| {
                Arc::new(PresetObjective(id.clone())) as Arc<dyn ObjectiveFunction<DummyEncoding>>
            })
            .collect()
    }

    fn child_objectives(
        &self,
        _objective: &ObjectiveId,
    ) -> Vec<Arc<dyn ObjectiveFunction<DummyEncoding>>> {
        Vec::new()
    }

    fn path_distance(&self, from: &NodeId, _to: &NodeId) -> Result<f64, DistanceError> {
        Err(DistanceError::UnknownNode(from.clone()))
    }
}

/// Single-point splice crossover, two children.
pub struct DummyCrossover;

impl Crossover<DummyEncoding> for DummyCrossover {
    fn cross_over(
        &mut self,
        a: &DummyEncoding,
        b: &DummyEncoding,
        rng: &mut ChaCha8Rng,
    ) -> Vec<DummyEncoding> {
        if a.genome.is_empty() || b.genome.is_empty() {
            return vec![a.clone(), b.clone()];
        }

        let cut_a = rng.gen_range(0..=a.genome.len());
        let cut_b = rng.gen_range(0..=b.genome.len());

        let left: Vec<u64> = a.genome[..cut_a]
            .iter()
            .chain(&b.genome[cut_b..])
            .copied()
            .collect();
        let right: Vec<u64> = b.genome[..cut_b]
            .iter()
            .chain(&a.genome[cut_a..])
            .copied()
            .collect();

        vec![DummyEncoding::new(left), DummyEncoding::new(right)]
    }
}
