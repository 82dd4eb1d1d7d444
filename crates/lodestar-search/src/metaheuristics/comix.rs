//! COMIX: a global search combined with focused local searches.
//!
//! The global search runs first over the whole objective space; each focused
//! search then takes its scope minus whatever the global run already
//! covered. Archives are unioned per objective, keeping the globally best
//! entry.

use std::collections::BTreeSet;

use crate::budget::BudgetManager;
use crate::encoding::Encoding;
use crate::metaheuristics::{GeneticAlgorithm, SearchError};
use crate::objective::Archive;

pub struct Comix<E: Encoding> {
    global: (GeneticAlgorithm<E>, BudgetManager<E>),
    focused: Vec<(GeneticAlgorithm<E>, BudgetManager<E>)>,
}

impl<E: Encoding> Comix<E> {
    pub fn new(
        global: (GeneticAlgorithm<E>, BudgetManager<E>),
        focused: Vec<(GeneticAlgorithm<E>, BudgetManager<E>)>,
    ) -> Self {
        Self { global, focused }
    }

    pub fn search(&mut self) -> Result<Archive<E>, SearchError> {
        let (global, global_budgets) = &mut self.global;
        let mut merged = global.search(global_budgets)?;

        let already_covered: BTreeSet<_> = merged.objectives().cloned().collect();

        for (algorithm, budgets) in &mut self.focused {
            algorithm.exclude_objectives(already_covered.clone());
            let archive = algorithm.search(budgets)?;
            merged.merge(archive);
        }

        Ok(merged)
    }
}
