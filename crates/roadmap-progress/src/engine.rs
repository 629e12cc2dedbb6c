//! Status mutation
//!
//! Applies one status edit to a roadmap and recomputes everything derived
//! from it.

use roadmap_model::{RoadmapTree, Status};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::recompute_derived;

/// Position of an editable node inside a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePath {
    /// `phases[p]`
    Phase(usize),
    /// `phases[p].topics[t]`
    Topic(usize, usize),
    /// `phases[p].topics[t].options[o]`
    TopicOption(usize, usize, usize),
    /// `extras[x]`
    Extra(usize),
    /// `extras[x].options[o]`
    ExtraOption(usize, usize),
}

/// Locate `node_id` depth-first: each phase, then its topics, then one
/// level into each topic's options; then extras and their options.
/// First match wins.
#[must_use]
pub fn locate(tree: &RoadmapTree, node_id: &str) -> Option<NodePath> {
    for (p, phase) in tree.phases.iter().enumerate() {
        if phase.id == node_id {
            return Some(NodePath::Phase(p));
        }
        for (t, topic) in phase.topics.iter().enumerate() {
            if topic.id == node_id {
                return Some(NodePath::Topic(p, t));
            }
            if let Some(o) = topic.options.iter().position(|option| option.id == node_id) {
                return Some(NodePath::TopicOption(p, t, o));
            }
        }
    }

    for (x, extra) in tree.extras.iter().enumerate() {
        if extra.id == node_id {
            return Some(NodePath::Extra(x));
        }
        if let Some(o) = extra.options.iter().position(|option| option.id == node_id) {
            return Some(NodePath::ExtraOption(x, o));
        }
    }

    None
}

fn set_status(tree: &mut RoadmapTree, path: NodePath, status: Status) {
    match path {
        NodePath::Phase(p) => tree.phases[p].status = status.into(),
        NodePath::Topic(p, t) => tree.phases[p].topics[t].status = status.into(),
        NodePath::TopicOption(p, t, o) => {
            tree.phases[p].topics[t].options[o].status = status.into();
        }
        NodePath::Extra(x) => tree.extras[x].status = status.into(),
        NodePath::ExtraOption(x, o) => tree.extras[x].options[o].status = status.into(),
    }
}

/// Set the status of `node_id` and recompute every phase status and the
/// progress percentage.
///
/// The input is never modified; the result is a fresh tree. An id that
/// matches nothing is not an error: the result is then deep-equal to the
/// input and nothing is recomputed.
#[tracing::instrument(level = "debug", skip(tree), fields(status = %new_status))]
#[must_use]
pub fn apply_status_change(tree: &RoadmapTree, node_id: &str, new_status: Status) -> RoadmapTree {
    match locate(tree, node_id) {
        Some(path) => {
            let mut updated = tree.clone();
            apply_at(&mut updated, path, new_status);
            updated
        }
        None => {
            debug!(node_id, "status change ignored, node not found");
            tree.clone()
        }
    }
}

fn apply_at(tree: &mut RoadmapTree, path: NodePath, status: Status) {
    set_status(tree, path, status);
    recompute_derived(tree);
    debug!(?path, progress = tree.progress, "status applied");
}

/// Status edit request as received from the calling layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Current roadmap
    #[serde(rename = "roadmapJson")]
    pub roadmap: RoadmapTree,
    /// Raw id of the node to edit
    pub node_id: String,
    /// Requested status
    pub new_status: Status,
}

impl StatusUpdate {
    /// Build a request for `node_id`
    #[must_use]
    pub fn new(roadmap: RoadmapTree, node_id: impl Into<String>, new_status: Status) -> Self {
        Self {
            roadmap,
            node_id: node_id.into(),
            new_status,
        }
    }
}

/// Owned form of [`apply_status_change`].
///
/// The caller keeps whatever copy of the old tree it needs for diffing or
/// rollback; a miss hands back the request's tree untouched.
#[must_use]
pub fn update_status(request: StatusUpdate) -> RoadmapTree {
    let StatusUpdate {
        mut roadmap,
        node_id,
        new_status,
    } = request;

    match locate(&roadmap, &node_id) {
        Some(path) => {
            apply_at(&mut roadmap, path, new_status);
            roadmap
        }
        None => {
            debug!(%node_id, "status change ignored, node not found");
            roadmap
        }
    }
}
