//! Observability hooks for a search run.
//!
//! External statistics and coverage writers subscribe through
//! [`SearchListener`]; the engine calls them at search start, after every
//! completed generation and at search stop.

use crate::encoding::Encoding;
use crate::objective::{Archive, ObjectiveId};

/// Point-in-time view of a running search.
#[derive(Debug, Clone)]
pub struct SearchStatus {
    /// Completed generations (0 during initialization).
    pub generation: u64,
    pub covered: usize,
    pub uncovered: usize,
    /// Fraction of known objectives covered so far.
    pub coverage: f64,
    /// Objectives the search is currently pressing on.
    pub tracked_objectives: Vec<ObjectiveId>,
}

/// Subscriber to search lifecycle events. All methods default to no-ops.
pub trait SearchListener<E: Encoding> {
    fn search_started(&mut self, _status: &SearchStatus) {}

    fn iteration(&mut self, _status: &SearchStatus) {}

    fn search_stopped(&mut self, _status: &SearchStatus, _archive: &Archive<E>) {}
}
