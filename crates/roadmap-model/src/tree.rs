//! Roadmap tree
//!
//! The owned value every other component operates on. Cloning a
//! [`RoadmapTree`] is a full deep copy and `==` is structural deep
//! equality; nothing inside the tree is shared.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::status::{NodeStatus, PhaseStatus};

/// Full learning plan for one goal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTree {
    /// Title and user context
    #[serde(default)]
    pub meta: Meta,
    /// Percentage 0-100 derived from leaf statuses
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    /// Ordered sequential stages
    pub phases: Vec<Phase>,
    /// Milestones spliced after their phase
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    /// Supplementary content outside the core path
    #[serde(default)]
    pub extras: Vec<Extra>,
    /// Neighbouring fields of study
    #[serde(default)]
    pub related_fields: Vec<RelatedField>,
    /// Frequently asked questions
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

/// Roadmap heading information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Roadmap title
    #[serde(default)]
    pub title: String,
    /// Short description
    #[serde(default)]
    pub about: String,
    /// What the user told the generator
    #[serde(default)]
    pub user_context: UserContext,
}

/// Notes captured when the goal was created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Stated experience level
    #[serde(default)]
    pub experience: Option<String>,
    /// Focus notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Top-level ordered stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub status: PhaseStatus,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Whether a topic is essential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TopicKind {
    #[default]
    #[serde(alias = "core")]
    Core,
    #[serde(alias = "optional")]
    Optional,
}

/// Learning topic on the main path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: TopicKind,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Branches off this topic. Exactly one level deep.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<TopicOption>,
}

/// Branch under a topic or extra.
///
/// Has no `options` field, so nesting stops here. Unknown fields are
/// rejected so a nested `options` array in the input is a parse error
/// instead of being silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopicOption {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: TopicKind,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Milestone anchored to one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub id: String,
    /// Id of the phase this checkpoint closes
    pub phase_id: String,
    /// Title of that phase, as emitted by the generator
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_phase: Option<String>,
    /// What the learner should be able to do here
    #[serde(default)]
    pub about: String,
}

/// Supplementary topic living at the tree root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub options: Vec<TopicOption>,
}

/// Neighbouring field of study. Leaf only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedField {
    pub id: String,
    pub title: String,
}

/// Question and answer shown under the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Learning material attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    pub category: ResourceCategory,
}

/// Medium of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(alias = "video")]
    Video,
    #[serde(alias = "article")]
    Article,
    #[serde(alias = "course")]
    Course,
    #[serde(alias = "documentation")]
    Documentation,
    #[serde(alias = "interactive")]
    Interactive,
}

/// Price bucket of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    #[serde(alias = "free")]
    Free,
    #[serde(alias = "paid")]
    Paid,
}

/// Row of the dashboard phase mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
    pub title: String,
    pub status: PhaseStatus,
    pub order_index: usize,
}

impl RoadmapTree {
    /// Phase by raw id
    #[must_use]
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.id == id)
    }

    /// Checkpoints anchored to `phase_id`, in declaration order
    pub fn checkpoints_for<'a>(
        &'a self,
        phase_id: &'a str,
    ) -> impl Iterator<Item = &'a Checkpoint> + 'a {
        self.checkpoints
            .iter()
            .filter(move |checkpoint| checkpoint.phase_id == phase_id)
    }

    /// Ordered `(title, status, index)` projection of the phases
    #[must_use]
    pub fn phase_summaries(&self) -> Vec<PhaseSummary> {
        self.phases
            .iter()
            .enumerate()
            .map(|(order_index, phase)| PhaseSummary {
                title: phase.title.clone(),
                status: phase.status,
                order_index,
            })
            .collect()
    }
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    // The generator emits progress as a numeric string.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(text) => text.trim().parse::<u64>().map_err(de::Error::custom)?,
    };
    match u8::try_from(value) {
        Ok(progress) if progress <= 100 => Ok(progress),
        _ => Err(de::Error::custom(format!("progress out of range: {value}"))),
    }
}
