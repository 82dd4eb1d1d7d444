//! Best-found archive.
//!
//! Maps every objective that was ever covered to the best encoding observed
//! for it. Updates are monotone: an entry is replaced only by a strictly
//! smaller distance, or an equal distance achieved by a simpler encoding.
//! Once an objective's entry reaches distance 0 it is never evicted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::encoding::Encoding;
use crate::objective::ObjectiveId;

/// Best encoding recorded for one objective.
#[derive(Debug, Clone)]
pub struct ArchiveEntry<E> {
    pub encoding: E,
    pub distance: f64,
}

/// Archive of best-found encodings, keyed by objective.
///
/// Keys are ordered so iteration (and everything derived from it) is
/// deterministic.
#[derive(Debug, Clone)]
pub struct Archive<E: Encoding> {
    entries: BTreeMap<ObjectiveId, ArchiveEntry<E>>,
}

/// Serializable snapshot of archive coverage, for external writers.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageSummary {
    pub covered: usize,
    pub total: usize,
    pub coverage: f64,
    pub objectives: Vec<String>,
}

impl CoverageSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<E: Encoding> Archive<E> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, objective: &ObjectiveId) -> Option<&ArchiveEntry<E>> {
        self.entries.get(objective)
    }

    pub fn contains(&self, objective: &ObjectiveId) -> bool {
        self.entries.contains_key(objective)
    }

    pub fn objectives(&self) -> impl Iterator<Item = &ObjectiveId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectiveId, &ArchiveEntry<E>)> {
        self.entries.iter()
    }

    /// Record `encoding` for `objective` if it improves on the current entry.
    ///
    /// Returns true when the archive changed. Re-inserting the current best
    /// is a no-op.
    pub fn update(&mut self, objective: ObjectiveId, encoding: &E, distance: f64) -> bool {
        match self.entries.get(&objective) {
            None => {}
            Some(current) => {
                let better = distance < current.distance
                    || (distance == current.distance
                        && encoding.size() < current.encoding.size());
                if !better {
                    return false;
                }
            }
        }

        self.entries.insert(
            objective,
            ArchiveEntry {
                encoding: encoding.clone(),
                distance,
            },
        );
        true
    }

    /// Union with another archive, keeping the better entry per objective.
    pub fn merge(&mut self, other: Archive<E>) {
        for (objective, entry) in other.entries {
            self.update(objective, &entry.encoding, entry.distance);
        }
    }

    /// Coverage snapshot relative to a total objective count.
    pub fn summary(&self, total: usize) -> CoverageSummary {
        let covered = self.entries.len();
        CoverageSummary {
            covered,
            total,
            coverage: if total == 0 {
                0.0
            } else {
                covered as f64 / total as f64
            },
            objectives: self.entries.keys().map(|id| id.to_string()).collect(),
        }
    }
}

impl<E: Encoding> Default for Archive<E> {
    fn default() -> Self {
        Self::new()
    }
}
