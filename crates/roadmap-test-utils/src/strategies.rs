//! Proptest strategies for well-formed roadmap trees.
//!
//! Ids follow `p{i}`, `p{i}t{j}`, `p{i}t{j}o{k}`, `x{i}`, `x{i}o{k}`,
//! `c{i}` and `r{i}`, so generated trees always pass
//! [`RoadmapTree::check_invariants`].

use proptest::prelude::*;
use roadmap_model::{NodeStatus, PhaseStatus, RelatedField, RoadmapTree, Status};

use crate::{checkpoint, extra, option, phase, roadmap, topic_with_options};

/// Topic or extra status plus the statuses of its options
pub type BranchShape = (NodeStatus, Vec<NodeStatus>);

/// Phase status plus its topics
pub type PhaseShape = (PhaseStatus, Vec<BranchShape>);

pub fn leaf_status() -> impl Strategy<Value = NodeStatus> {
    prop_oneof![
        Just(NodeStatus::Pending),
        Just(NodeStatus::Progress),
        Just(NodeStatus::Completed),
        Just(NodeStatus::Skipped),
    ]
}

pub fn phase_status() -> impl Strategy<Value = PhaseStatus> {
    prop_oneof![
        Just(PhaseStatus::Pending),
        Just(PhaseStatus::Active),
        Just(PhaseStatus::Completed),
        Just(PhaseStatus::Skipped),
    ]
}

/// Any value accepted at the edit boundary
pub fn edit_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn branch_shape() -> impl Strategy<Value = BranchShape> {
    (leaf_status(), prop::collection::vec(leaf_status(), 0..3))
}

/// Assemble a tree from shapes. `checkpoint_phases` holds, per
/// checkpoint, an index into the phases (taken modulo their count).
pub fn build_tree(
    phases: Vec<PhaseShape>,
    extras: Vec<BranchShape>,
    checkpoint_phases: &[usize],
    related: usize,
) -> RoadmapTree {
    let phases: Vec<_> = phases
        .into_iter()
        .enumerate()
        .map(|(p, (status, topics))| {
            let topics = topics
                .into_iter()
                .enumerate()
                .map(|(t, (topic_status, options))| {
                    let options = options
                        .into_iter()
                        .enumerate()
                        .map(|(o, s)| option(&format!("p{p}t{t}o{o}"), s))
                        .collect();
                    topic_with_options(&format!("p{p}t{t}"), topic_status, options)
                })
                .collect();
            phase(&format!("p{p}"), status, topics)
        })
        .collect();

    let checkpoints = if phases.is_empty() {
        Vec::new()
    } else {
        checkpoint_phases
            .iter()
            .enumerate()
            .map(|(c, target)| checkpoint(&format!("c{c}"), &phases[target % phases.len()].id))
            .collect()
    };

    let mut tree = roadmap(phases);
    tree.checkpoints = checkpoints;
    tree.extras = extras
        .into_iter()
        .enumerate()
        .map(|(x, (status, options))| {
            let options = options
                .into_iter()
                .enumerate()
                .map(|(o, s)| option(&format!("x{x}o{o}"), s))
                .collect();
            extra(&format!("x{x}"), status, options)
        })
        .collect();
    tree.related_fields = (0..related)
        .map(|r| RelatedField {
            id: format!("r{r}"),
            title: format!("Related {r}"),
        })
        .collect();
    tree
}

/// Random well-formed tree with up to 4 phases of up to 4 topics each
pub fn roadmap_tree() -> impl Strategy<Value = RoadmapTree> {
    (
        prop::collection::vec((phase_status(), prop::collection::vec(branch_shape(), 0..4)), 0..4),
        prop::collection::vec(branch_shape(), 0..3),
        prop::collection::vec(any::<usize>(), 0..4),
        0..3_usize,
    )
        .prop_map(|(phases, extras, checkpoint_phases, related)| {
            build_tree(phases, extras, &checkpoint_phases, related)
        })
}
