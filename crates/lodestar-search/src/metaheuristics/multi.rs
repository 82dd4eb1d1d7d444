//! MultiGA: several sub-searches over disjoint objective partitions.
//!
//! Each sub-search owns its population, budget manager and objective scope;
//! the archives are unioned per objective, keeping the globally best entry.

use std::collections::BTreeSet;

use crate::budget::BudgetManager;
use crate::encoding::Encoding;
use crate::metaheuristics::{GeneticAlgorithm, SearchError};
use crate::objective::{Archive, ObjectiveId};
use crate::subject::SearchSubject;

pub struct MultiGa<E: Encoding> {
    searches: Vec<(GeneticAlgorithm<E>, BudgetManager<E>)>,
}

impl<E: Encoding> MultiGa<E> {
    pub fn new(searches: Vec<(GeneticAlgorithm<E>, BudgetManager<E>)>) -> Self {
        Self { searches }
    }

    /// Round-robin partition of a subject's objectives into `parts` disjoint
    /// scopes, in stable objective order.
    pub fn partition_objectives(
        subject: &dyn SearchSubject<E>,
        parts: usize,
    ) -> Vec<BTreeSet<ObjectiveId>> {
        let mut ids: Vec<ObjectiveId> = subject
            .objectives()
            .iter()
            .map(|objective| objective.id().clone())
            .collect();
        ids.sort();

        let mut scopes = vec![BTreeSet::new(); parts.max(1)];
        let scope_count = scopes.len();
        for (index, id) in ids.into_iter().enumerate() {
            scopes[index % scope_count].insert(id);
        }
        scopes
    }

    /// Run every sub-search to completion and merge the archives.
    pub fn search(&mut self) -> Result<Archive<E>, SearchError> {
        let mut merged = Archive::new();
        for (algorithm, budgets) in &mut self.searches {
            let archive = algorithm.search(budgets)?;
            merged.merge(archive);
        }
        Ok(merged)
    }
}
