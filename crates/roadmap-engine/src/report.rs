//! Progress summary for dashboards.

use roadmap_model::{PhaseSummary, RoadmapTree};
use roadmap_progress::ProgressCounts;
use serde::{Deserialize, Serialize};

/// Overall progress plus the per-phase mirror rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Percentage, recomputed from the tree rather than read from it
    pub progress: u8,
    pub finished: usize,
    pub total: usize,
    pub phases: Vec<PhaseSummary>,
}

impl ProgressReport {
    #[must_use]
    pub fn of(tree: &RoadmapTree) -> Self {
        let counts = ProgressCounts::of(tree);
        Self {
            progress: counts.percent(),
            finished: counts.finished,
            total: counts.total,
            phases: tree.phase_summaries(),
        }
    }
}
