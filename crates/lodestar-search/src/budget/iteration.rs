//! Budget for the number of generations performed during the search.

use std::marker::PhantomData;

use crate::budget::Budget;
use crate::encoding::Encoding;
use crate::events::SearchStatus;

pub struct IterationBudget<E> {
    max_iterations: u64,
    used: u64,
    tracking: bool,
    _encoding: PhantomData<E>,
}

impl<E> IterationBudget<E> {
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            used: 0,
            tracking: false,
            _encoding: PhantomData,
        }
    }
}

impl<E: Encoding> Budget<E> for IterationBudget<E> {
    fn remaining_fraction(&self) -> f64 {
        if self.max_iterations == 0 {
            return 0.0;
        }
        (self.max_iterations.saturating_sub(self.used)) as f64 / self.max_iterations as f64
    }

    fn used(&self) -> f64 {
        self.used as f64
    }

    fn total(&self) -> f64 {
        self.max_iterations as f64
    }

    fn reset(&mut self) {
        self.used = 0;
        self.tracking = false;
    }

    fn search_started(&mut self) {
        self.tracking = true;
    }

    fn search_stopped(&mut self) {
        self.tracking = false;
    }

    fn iteration(&mut self, _status: &SearchStatus) {
        if self.tracking && self.used < self.max_iterations {
            self.used += 1;
        }
    }
}
