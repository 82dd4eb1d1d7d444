//! Budgets and stopping criteria.
//!
//! Each budget is an independent resource counter that can halt the search.
//! Budgets observe the run through lifecycle hooks and report how much of
//! themselves is left; the [`BudgetManager`] composes them: the search halts
//! as soon as any registered budget is exhausted.

pub mod distance;
pub mod evaluation;
pub mod iteration;
pub mod time;

pub use distance::DistanceEarlyStoppingBudget;
pub use evaluation::EvaluationBudget;
pub use iteration::IterationBudget;
pub use time::{SearchTimeBudget, TotalTimeBudget};

use crate::encoding::Encoding;
use crate::events::SearchStatus;

/// A resource counter that can halt the search.
///
/// `used` and `total` are in budget-specific units (iterations, seconds,
/// ...); `remaining_fraction` is the normalized form the manager composes
/// on: 1 means untouched, 0 means exhausted.
pub trait Budget<E: Encoding> {
    fn remaining_fraction(&self) -> f64;

    fn used(&self) -> f64;

    fn total(&self) -> f64;

    fn reset(&mut self);

    fn initialization_started(&mut self) {}

    fn initialization_stopped(&mut self) {}

    fn search_started(&mut self) {}

    fn search_stopped(&mut self) {}

    /// Called after each completed generation.
    fn iteration(&mut self, _status: &SearchStatus) {}

    /// Called after each encoding evaluation is folded.
    fn evaluation(&mut self, _encoding: &E) {}
}

/// Composite over independent budgets.
///
/// Exhausted when any child is exhausted; remaining fraction is the minimum
/// over children; reset resets every child.
pub struct BudgetManager<E: Encoding> {
    budgets: Vec<Box<dyn Budget<E>>>,
}

impl<E: Encoding> BudgetManager<E> {
    pub fn new() -> Self {
        Self { budgets: Vec::new() }
    }

    pub fn register(&mut self, budget: Box<dyn Budget<E>>) {
        self.budgets.push(budget);
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn exhausted(&self) -> bool {
        self.budgets.iter().any(|b| b.remaining_fraction() <= 0.0)
    }

    pub fn remaining_fraction(&self) -> f64 {
        self.budgets
            .iter()
            .map(|b| b.remaining_fraction())
            .fold(1.0, f64::min)
    }

    pub fn reset(&mut self) {
        for budget in &mut self.budgets {
            budget.reset();
        }
    }

    pub fn initialization_started(&mut self) {
        for budget in &mut self.budgets {
            budget.initialization_started();
        }
    }

    pub fn initialization_stopped(&mut self) {
        for budget in &mut self.budgets {
            budget.initialization_stopped();
        }
    }

    pub fn search_started(&mut self) {
        for budget in &mut self.budgets {
            budget.search_started();
        }
    }

    pub fn search_stopped(&mut self) {
        for budget in &mut self.budgets {
            budget.search_stopped();
        }
    }

    pub fn iteration(&mut self, status: &SearchStatus) {
        for budget in &mut self.budgets {
            budget.iteration(status);
        }
    }

    pub fn evaluation(&mut self, encoding: &E) {
        for budget in &mut self.budgets {
            budget.evaluation(encoding);
        }
    }
}

impl<E: Encoding> Default for BudgetManager<E> {
    fn default() -> Self {
        Self::new()
    }
}
