//! Derived values: phase status and overall progress.
//!
//! Both are recomputed from leaf statuses every time; nothing here is
//! incremental.

use std::iter;

use roadmap_model::{NodeStatus, Phase, PhaseStatus, RoadmapTree};
use serde::{Deserialize, Serialize};

/// Status of `phase` derived from its topics and their options.
///
/// - no descendants: current status is kept
/// - all descendants finished: `Completed` if any was completed, else `Skipped`
/// - otherwise a finished phase regresses to `Active`; `Pending`/`Active` stay as they are
#[must_use]
pub fn aggregate_phase_status(phase: &Phase) -> PhaseStatus {
    let mut descendants = phase_descendants(phase).peekable();
    if descendants.peek().is_none() {
        return phase.status;
    }

    let (all_finished, any_completed) = descendants.fold((true, false), |(all, any), status| {
        (all && status.is_finished(), any || status == NodeStatus::Completed)
    });

    match (all_finished, any_completed) {
        (true, true) => PhaseStatus::Completed,
        (true, false) => PhaseStatus::Skipped,
        (false, _) if phase.status.is_finished() => PhaseStatus::Active,
        (false, _) => phase.status,
    }
}

fn phase_descendants(phase: &Phase) -> impl Iterator<Item = NodeStatus> + '_ {
    phase.topics.iter().flat_map(|topic| {
        iter::once(topic.status).chain(topic.options.iter().map(|option| option.status))
    })
}

/// Finished and total counts of the nodes that make up progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressCounts {
    /// `Completed` or `Skipped`
    pub finished: usize,
    /// Topics, extras and every option under either
    pub total: usize,
}

impl ProgressCounts {
    /// Count every topic, every option one level under a topic or extra,
    /// and every extra.
    #[must_use]
    pub fn of(tree: &RoadmapTree) -> Self {
        let topics = tree.phases.iter().flat_map(phase_descendants);
        let extras = tree.extras.iter().flat_map(|extra| {
            iter::once(extra.status).chain(extra.options.iter().map(|option| option.status))
        });

        topics
            .chain(extras)
            .fold(Self::default(), |counts, status| Self {
                finished: counts.finished + usize::from(status.is_finished()),
                total: counts.total + 1,
            })
    }

    /// `floor(100 * finished / total)`, or 0 when there is nothing to count
    #[must_use]
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        u8::try_from(self.finished * 100 / self.total).unwrap_or(100)
    }
}

/// Overall progress percentage of `tree`
#[inline]
#[must_use]
pub fn compute_progress(tree: &RoadmapTree) -> u8 {
    ProgressCounts::of(tree).percent()
}

/// Recompute every phase status and the progress field in place.
pub fn recompute_derived(tree: &mut RoadmapTree) {
    for phase in &mut tree.phases {
        phase.status = aggregate_phase_status(phase);
    }
    tree.progress = compute_progress(tree);
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_test_utils::{checkpoint, extra, option, phase, roadmap, topic, topic_with_options};

    fn phase_of(status: PhaseStatus, leaves: &[NodeStatus]) -> Phase {
        let topics = leaves
            .iter()
            .enumerate()
            .map(|(i, s)| topic(&format!("t{i}"), *s))
            .collect();
        phase("p", status, topics)
    }

    #[test]
    fn completed_and_skipped_completes_the_phase() {
        let p = phase_of(PhaseStatus::Active, &[NodeStatus::Completed, NodeStatus::Skipped]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Completed);
    }

    #[test]
    fn all_skipped_skips_the_phase() {
        let p = phase_of(PhaseStatus::Active, &[NodeStatus::Skipped, NodeStatus::Skipped]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Skipped);
    }

    #[test]
    fn regression_downgrades_finished_phase_to_active() {
        let p = phase_of(PhaseStatus::Completed, &[NodeStatus::Completed, NodeStatus::Pending]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Active);

        let p = phase_of(PhaseStatus::Skipped, &[NodeStatus::Skipped, NodeStatus::Progress]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Active);
    }

    #[test]
    fn partial_progress_does_not_promote_pending() {
        let p = phase_of(PhaseStatus::Pending, &[NodeStatus::Completed, NodeStatus::Pending]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Pending);

        let p = phase_of(PhaseStatus::Active, &[NodeStatus::Pending]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Active);
    }

    #[test]
    fn empty_phase_keeps_its_status() {
        let p = phase_of(PhaseStatus::Skipped, &[]);
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Skipped);
    }

    #[test]
    fn options_count_as_descendants() {
        let p = phase(
            "p",
            PhaseStatus::Pending,
            vec![topic_with_options(
                "t",
                NodeStatus::Completed,
                vec![option("o", NodeStatus::Pending)],
            )],
        );
        assert_eq!(aggregate_phase_status(&p), PhaseStatus::Pending);
    }

    #[test]
    fn progress_floors_the_ratio() {
        let tree = roadmap(vec![phase_of(
            PhaseStatus::Active,
            &[NodeStatus::Completed, NodeStatus::Pending, NodeStatus::Pending],
        )]);
        assert_eq!(ProgressCounts::of(&tree), ProgressCounts { finished: 1, total: 3 });
        assert_eq!(compute_progress(&tree), 33);
    }

    #[test]
    fn progress_of_empty_tree_is_zero() {
        assert_eq!(compute_progress(&roadmap(Vec::new())), 0);
    }

    #[test]
    fn progress_counts_extras_and_their_options_but_not_checkpoints() {
        let mut tree = roadmap(vec![phase_of(PhaseStatus::Pending, &[NodeStatus::Pending])]);
        tree.checkpoints = vec![checkpoint("c", "p")];
        tree.extras = vec![extra(
            "x",
            NodeStatus::Skipped,
            vec![option("xo", NodeStatus::Completed)],
        )];

        let counts = ProgressCounts::of(&tree);
        assert_eq!(counts, ProgressCounts { finished: 2, total: 3 });
        assert_eq!(counts.percent(), 66);
    }

    #[test]
    fn recompute_updates_every_phase_and_progress() {
        let mut tree = roadmap(vec![
            phase_of(PhaseStatus::Pending, &[NodeStatus::Completed]),
            phase_of(PhaseStatus::Completed, &[NodeStatus::Pending]),
        ]);
        tree.phases[1].id = "p2".into();
        recompute_derived(&mut tree);

        assert_eq!(tree.phases[0].status, PhaseStatus::Completed);
        assert_eq!(tree.phases[1].status, PhaseStatus::Active);
        assert_eq!(tree.progress, 50);
    }
}
