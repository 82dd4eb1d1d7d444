//! Objective manager.
//!
//! Owns the live view of which objectives are still uncovered, folds
//! evaluation results into encodings and the archive, and re-scopes the
//! uncovered set as coverage progresses: covering an objective retires it
//! permanently and seeds its graph-adjacent children into the search.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::budget::BudgetManager;
use crate::encoding::{Encoding, EncodingId, EncodingRunner, ExecutionTrace};
use crate::objective::{Archive, ObjectiveFunction, ObjectiveId};
use crate::subject::SearchSubject;

/// Outcome of evaluating one batch of encodings.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    /// Encodings that executed and were scored.
    pub evaluated: usize,
    /// Encodings whose execution failed; they carry no distances and must be
    /// excluded from the generation's survivors.
    pub failed: Vec<EncodingId>,
    /// Objectives covered for the first time by this batch.
    pub newly_covered: Vec<ObjectiveId>,
}

/// Tracks covered/uncovered objectives and maintains the best-found archive.
pub struct ObjectiveManager<E: Encoding> {
    runner: Box<dyn EncodingRunner<E>>,
    uncovered: BTreeMap<ObjectiveId, Arc<dyn ObjectiveFunction<E>>>,
    covered: BTreeMap<ObjectiveId, Arc<dyn ObjectiveFunction<E>>>,
    archive: Archive<E>,
}

impl<E: Encoding> ObjectiveManager<E> {
    pub fn new(runner: Box<dyn EncodingRunner<E>>) -> Self {
        Self {
            runner,
            uncovered: BTreeMap::new(),
            covered: BTreeMap::new(),
            archive: Archive::new(),
        }
    }

    /// Seed the uncovered set from the subject's objectives.
    ///
    /// Called once at search start, and again whenever the subject's
    /// objective set changes. Objectives that were already covered stay
    /// covered.
    pub fn update_objectives(&mut self, subject: &dyn SearchSubject<E>) {
        for objective in subject.objectives() {
            let id = objective.id().clone();
            if !self.covered.contains_key(&id) {
                self.uncovered.entry(id).or_insert(objective);
            }
        }
    }

    /// Restrict the tracked objectives to the given scope.
    ///
    /// Used by composed searches that assign disjoint objective subsets to
    /// sub-populations.
    pub fn retain_objectives(&mut self, keep: &BTreeSet<ObjectiveId>) {
        self.uncovered.retain(|id, _| keep.contains(id));
    }

    /// Drop the given objectives from the uncovered set.
    pub fn exclude_objectives(&mut self, drop: &BTreeSet<ObjectiveId>) {
        self.uncovered.retain(|id, _| !drop.contains(id));
    }

    pub fn uncovered_ids(&self) -> Vec<ObjectiveId> {
        self.uncovered.keys().cloned().collect()
    }

    pub fn all_ids(&self) -> Vec<ObjectiveId> {
        let mut ids: Vec<ObjectiveId> = self.uncovered.keys().cloned().collect();
        ids.extend(self.covered.keys().cloned());
        ids.sort();
        ids
    }

    pub fn uncovered_count(&self) -> usize {
        self.uncovered.len()
    }

    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    /// Fraction of known objectives covered so far.
    pub fn coverage(&self) -> f64 {
        let total = self.uncovered.len() + self.covered.len();
        if total == 0 {
            0.0
        } else {
            self.covered.len() as f64 / total as f64
        }
    }

    pub fn archive(&self) -> &Archive<E> {
        &self.archive
    }

    /// Evaluate a batch of encodings in sequence order.
    ///
    /// Execution happens first for the whole batch; results are folded
    /// afterwards, in the encodings' order, so the fold is deterministic
    /// regardless of how the runner schedules the executions internally.
    pub fn evaluate(
        &mut self,
        subject: &dyn SearchSubject<E>,
        encodings: &mut [E],
        budgets: &mut BudgetManager<E>,
    ) -> EvaluationReport {
        let mut report = EvaluationReport::default();

        // Execution pass: collect traces in batch order.
        let mut traces: Vec<Option<ExecutionTrace>> = Vec::with_capacity(encodings.len());
        for encoding in encodings.iter() {
            match self.runner.execute(subject, encoding) {
                Ok(trace) => traces.push(Some(trace)),
                Err(error) => {
                    log::debug!("evaluation failed, excluding encoding: {error}");
                    report.failed.push(encoding.id());
                    traces.push(None);
                }
            }
        }

        // Fold pass: score each executed encoding against every known
        // objective, update the archive, retire newly covered objectives.
        for (encoding, trace) in encodings.iter_mut().zip(traces) {
            let Some(trace) = trace else { continue };
            encoding.set_execution_trace(trace);
            report.evaluated += 1;

            let mut covered_now = Vec::new();
            for (id, objective) in self.uncovered.iter().chain(self.covered.iter()) {
                let distance = objective.distance(encoding);
                encoding.set_fitness(id.clone(), distance);

                if distance == 0.0 {
                    self.archive.update(id.clone(), encoding, distance);
                    if self.uncovered.contains_key(id) {
                        covered_now.push(id.clone());
                    }
                }
            }

            for id in covered_now {
                self.cover(subject, id, &mut report);
            }

            budgets.evaluation(encoding);
        }

        report
    }

    /// Retire a covered objective and seed its children into the search.
    fn cover(
        &mut self,
        subject: &dyn SearchSubject<E>,
        id: ObjectiveId,
        report: &mut EvaluationReport,
    ) {
        let Some(objective) = self.uncovered.remove(&id) else {
            return;
        };
        log::info!("objective covered: {id}");
        self.covered.insert(id.clone(), objective);
        report.newly_covered.push(id.clone());

        for child in subject.child_objectives(&id) {
            let child_id = child.id().clone();
            if !self.covered.contains_key(&child_id) {
                self.uncovered.entry(child_id).or_insert(child);
            }
        }
    }
}
