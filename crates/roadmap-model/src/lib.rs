//! Roadmap Model
//!
//! The roadmap tree produced by the generator and edited by the status
//! engine.
//!
//! # Core Concepts
//!
//! - [`RoadmapTree`]: owned root value; `Clone` is a deep copy, `==` is deep equality
//! - [`Phase`], [`Topic`], [`TopicOption`], [`Extra`], [`Checkpoint`], [`RelatedField`]:
//!   the closed node family. [`TopicOption`] has no `options` field, so nesting
//!   is capped at one level by construction.
//! - [`RoadmapNode`]: borrowed tagged view of any node
//! - [`Status`]: edit-boundary status, converted into [`PhaseStatus`] or [`NodeStatus`]
//!
//! # Example
//!
//! ```rust,ignore
//! use roadmap_model::RoadmapTree;
//!
//! let tree: RoadmapTree = serde_json::from_str(json)?;
//! tree.check_invariants().map_err(|v| anyhow::anyhow!("{v:?}"))?;
//! for summary in tree.phase_summaries() {
//!     println!("{} {:?}", summary.title, summary.status);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod node;
mod status;
mod tree;

pub use node::{InvariantViolation, NodeKind, RoadmapNode, UnknownNodeKind};
pub use status::{NodeStatus, ParseStatusError, PhaseStatus, Status};
pub use tree::{
    Checkpoint, Extra, Faq, Meta, Phase, PhaseSummary, RelatedField, Resource, ResourceCategory,
    ResourceKind, RoadmapTree, Topic, TopicKind, TopicOption, UserContext,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
