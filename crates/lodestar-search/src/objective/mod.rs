//! Structural objectives and their management.

pub mod archive;
pub mod branch;
pub mod manager;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

pub use archive::{Archive, ArchiveEntry, CoverageSummary};
pub use branch::BranchObjective;
pub use manager::{EvaluationReport, ObjectiveManager};

/// Identity of a structural objective.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectiveId(String);

impl ObjectiveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectiveId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A structural target an encoding may or may not satisfy.
///
/// `distance` is a pure function of the encoding's recorded execution:
/// non-negative, 0 exactly when the objective is covered.
pub trait ObjectiveFunction<E: Encoding>: Send + Sync {
    fn id(&self) -> &ObjectiveId;

    /// Name of the subject this objective belongs to.
    fn subject(&self) -> &str;

    fn distance(&self, encoding: &E) -> f64;
}
