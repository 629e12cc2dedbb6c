//! Closed node family
//!
//! [`RoadmapNode`] borrows one node of a tree as a tagged variant. The set
//! of kinds is fixed; [`NodeKind`] also names the graph id prefix for each.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::tree::{Checkpoint, Extra, Phase, RelatedField, RoadmapTree, Topic, TopicOption};

/// Kind of a roadmap node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Phase,
    Topic,
    Option,
    Checkpoint,
    Extra,
    Related,
}

impl NodeKind {
    /// Every kind
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Phase,
        NodeKind::Topic,
        NodeKind::Option,
        NodeKind::Checkpoint,
        NodeKind::Extra,
        NodeKind::Related,
    ];

    /// Lower-case name, also the graph id prefix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Topic => "topic",
            Self::Option => "option",
            Self::Checkpoint => "checkpoint",
            Self::Extra => "extra",
            Self::Related => "related",
        }
    }

    /// Namespaced graph id: `<kind>__<raw>`
    #[must_use]
    pub fn graph_id(self, raw: &str) -> String {
        format!("{}__{raw}", self.as_str())
    }

    /// Split a namespaced graph id back into kind and raw id
    #[must_use]
    pub fn parse_graph_id(graph_id: &str) -> Option<(Self, &str)> {
        let (prefix, raw) = graph_id.split_once("__")?;
        let kind = prefix.parse().ok()?;
        Some((kind, raw))
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

/// Unrecognized node kind text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node kind: {0:?}")]
pub struct UnknownNodeKind(pub String);

/// Borrowed view of one node in a [`RoadmapTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapNode<'a> {
    Phase(&'a Phase),
    Topic(&'a Topic),
    Option(&'a TopicOption),
    Checkpoint(&'a Checkpoint),
    Extra(&'a Extra),
    Related(&'a RelatedField),
}

impl<'a> RoadmapNode<'a> {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Phase(_) => NodeKind::Phase,
            Self::Topic(_) => NodeKind::Topic,
            Self::Option(_) => NodeKind::Option,
            Self::Checkpoint(_) => NodeKind::Checkpoint,
            Self::Extra(_) => NodeKind::Extra,
            Self::Related(_) => NodeKind::Related,
        }
    }

    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            Self::Phase(node) => &node.id,
            Self::Topic(node) => &node.id,
            Self::Option(node) => &node.id,
            Self::Checkpoint(node) => &node.id,
            Self::Extra(node) => &node.id,
            Self::Related(node) => &node.id,
        }
    }

    /// Display label. Checkpoints are labelled by their description.
    #[must_use]
    pub fn label(&self) -> &'a str {
        match self {
            Self::Phase(node) => &node.title,
            Self::Topic(node) => &node.title,
            Self::Option(node) => &node.title,
            Self::Checkpoint(node) => &node.about,
            Self::Extra(node) => &node.title,
            Self::Related(node) => &node.title,
        }
    }

    /// Status, for kinds that carry one
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Phase(node) => Some(node.status.into()),
            Self::Topic(node) => Some(node.status.into()),
            Self::Option(node) => Some(node.status.into()),
            Self::Extra(node) => Some(node.status.into()),
            Self::Checkpoint(_) | Self::Related(_) => None,
        }
    }
}

/// Broken structural invariant of a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// Two nodes share a raw id
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// Checkpoint references a phase that does not exist
    #[error("checkpoint {checkpoint} references unknown phase {phase_id}")]
    DanglingCheckpoint { checkpoint: String, phase_id: String },
}

impl RoadmapTree {
    /// Every node in depth-first declaration order: phases with their
    /// topics and options, then checkpoints, extras with their options,
    /// and related fields.
    #[must_use]
    pub fn nodes(&self) -> Vec<RoadmapNode<'_>> {
        let mut out = Vec::new();
        for phase in &self.phases {
            out.push(RoadmapNode::Phase(phase));
            for topic in &phase.topics {
                out.push(RoadmapNode::Topic(topic));
                out.extend(topic.options.iter().map(RoadmapNode::Option));
            }
        }
        out.extend(self.checkpoints.iter().map(RoadmapNode::Checkpoint));
        for extra in &self.extras {
            out.push(RoadmapNode::Extra(extra));
            out.extend(extra.options.iter().map(RoadmapNode::Option));
        }
        out.extend(self.related_fields.iter().map(RoadmapNode::Related));
        out
    }

    /// Check id uniqueness across phases, topics, options and extras, and
    /// that every checkpoint resolves to a phase.
    ///
    /// # Errors
    /// Returns every violation found.
    pub fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();

        for node in self.nodes() {
            let unique_scope = matches!(
                node.kind(),
                NodeKind::Phase | NodeKind::Topic | NodeKind::Option | NodeKind::Extra
            );
            if unique_scope && !seen.insert(node.id()) {
                violations.push(InvariantViolation::DuplicateId(node.id().to_string()));
            }
        }

        for checkpoint in &self.checkpoints {
            if self.phase(&checkpoint.phase_id).is_none() {
                violations.push(InvariantViolation::DanglingCheckpoint {
                    checkpoint: checkpoint.id.clone(),
                    phase_id: checkpoint.phase_id.clone(),
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
