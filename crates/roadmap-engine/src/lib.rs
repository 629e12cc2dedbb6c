//! Roadmap Engine
//!
//! Facade over the model, status and graph crates: the two operations the
//! visualizer calls, plus the configuration they share.
//!
//! # Core Concepts
//!
//! - [`render_roadmap`]: tree in, positioned and routed [`RoadmapLayout`] out
//! - [`update_status`]: one status edit with phases and progress recomputed
//! - [`EngineConfig`]: layout options, canvas margins and corner radius, loaded from TOML
//! - [`ProgressReport`]: percentage plus the phase mirror rows
//!
//! # Example
//!
//! ```rust,ignore
//! use roadmap_engine::{render_roadmap, update_status, EngineConfig, UpdateRequest};
//! use roadmap_graph::LayeredLayout;
//!
//! let config = EngineConfig::load("roadmap.toml")?;
//! let layout = render_roadmap(&tree, &LayeredLayout, &config).await?;
//!
//! let tree = update_status(UpdateRequest::new(tree, "css", Status::Completed));
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, Result};
pub use pipeline::{render_roadmap, RenderedEdge, RenderedNode, RoadmapLayout, Route};
pub use report::ProgressReport;
pub use roadmap_progress::update_status;

use std::path::Path;

use roadmap_model::RoadmapTree;

/// Request for [`update_status`]
pub type UpdateRequest = roadmap_progress::StatusUpdate;

/// Read a roadmap tree from a JSON file.
///
/// # Errors
/// [`EngineError::Io`] or [`EngineError::Json`].
pub fn read_tree(path: impl AsRef<Path>) -> Result<RoadmapTree> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
