//! Status vocabularies
//!
//! Phases and leaf nodes (topics, options, extras) use different status
//! enums. [`Status`] is the union accepted at the edit boundary; the
//! conversions into the per-kind enums are total.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseStatus {
    /// Work on the phase has started
    #[serde(alias = "active")]
    Active,
    /// Not started
    #[default]
    #[serde(alias = "pending")]
    Pending,
    /// Every descendant is finished and at least one was completed
    #[serde(alias = "completed")]
    Completed,
    /// Every descendant was skipped
    #[serde(alias = "skipped")]
    Skipped,
}

impl PhaseStatus {
    /// `Completed` or `Skipped`
    #[inline]
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Status of a topic, option or extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeStatus {
    /// Not started
    #[default]
    #[serde(alias = "pending")]
    Pending,
    /// In progress
    #[serde(alias = "progress")]
    Progress,
    /// Done
    #[serde(alias = "completed")]
    Completed,
    /// Deliberately passed over
    #[serde(alias = "skipped")]
    Skipped,
}

impl NodeStatus {
    /// Counts toward progress: `Completed` or `Skipped`
    #[inline]
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Status accepted from the edit boundary, valid for any node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not started
    #[serde(alias = "pending")]
    Pending,
    /// In progress (leaf wording)
    #[serde(alias = "progress")]
    Progress,
    /// In progress (phase wording)
    #[serde(alias = "active")]
    Active,
    /// Done
    #[serde(alias = "completed")]
    Completed,
    /// Deliberately passed over
    #[serde(alias = "skipped")]
    Skipped,
}

impl Status {
    /// All accepted values, in picker order
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::Progress,
        Status::Active,
        Status::Completed,
        Status::Skipped,
    ];

    /// Canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Progress => "Progress",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Skipped => "Skipped",
        }
    }
}

impl From<Status> for NodeStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => Self::Pending,
            Status::Progress | Status::Active => Self::Progress,
            Status::Completed => Self::Completed,
            Status::Skipped => Self::Skipped,
        }
    }
}

impl From<Status> for PhaseStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Pending => Self::Pending,
            Status::Progress | Status::Active => Self::Active,
            Status::Completed => Self::Completed,
            Status::Skipped => Self::Skipped,
        }
    }
}

impl From<NodeStatus> for Status {
    fn from(value: NodeStatus) -> Self {
        match value {
            NodeStatus::Pending => Self::Pending,
            NodeStatus::Progress => Self::Progress,
            NodeStatus::Completed => Self::Completed,
            NodeStatus::Skipped => Self::Skipped,
        }
    }
}

impl From<PhaseStatus> for Status {
    fn from(value: PhaseStatus) -> Self {
        match value {
            PhaseStatus::Active => Self::Active,
            PhaseStatus::Pending => Self::Pending,
            PhaseStatus::Completed => Self::Completed,
            PhaseStatus::Skipped => Self::Skipped,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Unrecognized status text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0:?}")]
pub struct ParseStatusError(pub String);
