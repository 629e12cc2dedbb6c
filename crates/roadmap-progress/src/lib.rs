//! Roadmap Progress
//!
//! Pure status engine for roadmap trees.
//!
//! # Core Concepts
//!
//! - [`apply_status_change`]: edit one node, returning a new tree with every
//!   phase status and the progress percentage recomputed
//! - [`update_status`]: owned variant taking a [`StatusUpdate`] request
//! - [`aggregate_phase_status`]: phase status derived from its topics and options
//! - [`ProgressCounts`]: finished/total counts behind the percentage
//!
//! Unknown ids are a silent no-op. The engine holds no state and takes no
//! locks; serializing concurrent edits is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use roadmap_model::Status;
//! use roadmap_progress::apply_status_change;
//!
//! let updated = apply_status_change(&tree, "t1", Status::Completed);
//! persist(&tree, &updated)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregate;
mod engine;

pub use aggregate::{aggregate_phase_status, compute_progress, recompute_derived, ProgressCounts};
pub use engine::{apply_status_change, locate, update_status, NodePath, StatusUpdate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
