//! Wall-clock budgets.
//!
//! `SearchTimeBudget` starts its clock when the search proper starts;
//! `TotalTimeBudget` also charges initialization time.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::budget::Budget;
use crate::encoding::Encoding;

/// Shared stopwatch logic for the two wall-clock budgets.
struct Stopwatch {
    max: Duration,
    started: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    fn new(max_seconds: u64) -> Self {
        Self {
            max: Duration::from_secs(max_seconds),
            started: None,
            accumulated: Duration::ZERO,
        }
    }

    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    fn used(&self) -> Duration {
        let running = self.started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO);
        self.accumulated + running
    }

    fn remaining_fraction(&self) -> f64 {
        if self.max.is_zero() {
            return 0.0;
        }
        let used = self.used();
        if used >= self.max {
            0.0
        } else {
            (self.max - used).as_secs_f64() / self.max.as_secs_f64()
        }
    }

    fn reset(&mut self) {
        self.started = None;
        self.accumulated = Duration::ZERO;
    }
}

/// Wall-clock budget over the search phase only.
pub struct SearchTimeBudget<E> {
    watch: Stopwatch,
    _encoding: PhantomData<E>,
}

impl<E> SearchTimeBudget<E> {
    pub fn new(max_seconds: u64) -> Self {
        Self {
            watch: Stopwatch::new(max_seconds),
            _encoding: PhantomData,
        }
    }
}

impl<E: Encoding> Budget<E> for SearchTimeBudget<E> {
    fn remaining_fraction(&self) -> f64 {
        self.watch.remaining_fraction()
    }

    fn used(&self) -> f64 {
        self.watch.used().as_secs_f64()
    }

    fn total(&self) -> f64 {
        self.watch.max.as_secs_f64()
    }

    fn reset(&mut self) {
        self.watch.reset();
    }

    fn search_started(&mut self) {
        self.watch.start();
    }

    fn search_stopped(&mut self) {
        self.watch.stop();
    }
}

/// Wall-clock budget over initialization plus search.
pub struct TotalTimeBudget<E> {
    watch: Stopwatch,
    _encoding: PhantomData<E>,
}

impl<E> TotalTimeBudget<E> {
    pub fn new(max_seconds: u64) -> Self {
        Self {
            watch: Stopwatch::new(max_seconds),
            _encoding: PhantomData,
        }
    }
}

impl<E: Encoding> Budget<E> for TotalTimeBudget<E> {
    fn remaining_fraction(&self) -> f64 {
        self.watch.remaining_fraction()
    }

    fn used(&self) -> f64 {
        self.watch.used().as_secs_f64()
    }

    fn total(&self) -> f64 {
        self.watch.max.as_secs_f64()
    }

    fn reset(&mut self) {
        self.watch.reset();
    }

    fn initialization_started(&mut self) {
        self.watch.start();
    }

    fn search_stopped(&mut self) {
        self.watch.stop();
    }
}
