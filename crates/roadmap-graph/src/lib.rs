//! Roadmap Graph
//!
//! Render-time transforms from a roadmap tree to a positioned diagram.
//!
//! # Core Concepts
//!
//! - [`GraphBuilder`]: flattens a tree into nodes plus `main`/`sub` edges
//! - [`LayoutEngine`]: async seam for the layout algorithm; [`LayeredLayout`] is built in
//! - [`LayoutOptions`]: fixed layout configuration with per-call string overrides
//! - [`CanvasSizer`]: padded canvas around a finished layout
//! - [`PathSmoother`]: rounds route corners into an SVG path
//! - [`NodeStyle`], [`EdgeStyle`], [`find_entry`]: total helpers for the renderer
//!
//! # Example
//!
//! ```rust,ignore
//! use roadmap_graph::{
//!     CanvasSizer, GraphBuilder, LayeredLayout, LayoutEngine, LayoutOptions, PathSmoother,
//! };
//!
//! let graph = GraphBuilder::new().build(&tree);
//! let layout = LayeredLayout.layout(&graph, &LayoutOptions::default()).await?;
//! let canvas = CanvasSizer::default().size(&layout);
//!
//! let smoother = PathSmoother::default();
//! for route in &layout.edges {
//!     draw(&smoother.smooth_route(route).to_string());
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod builder;
mod canvas;
mod error;
mod geometry;
mod layout;
mod lookup;
mod options;
mod smoothing;
mod style;

// Re-exports
pub use builder::{
    build_graph, EdgeKind, GraphBuilder, GraphEdge, GraphNode, RoadmapGraph, EXTRAS_HEADER_ID,
    EXTRAS_HEADER_LABEL,
};
pub use canvas::{Canvas, CanvasMargins, CanvasSizer};
pub use error::LayoutError;
pub use geometry::{Point, Size};
pub use layout::{EdgeRoute, LayeredLayout, LayoutEngine, LayoutResult, PositionedNode};
pub use lookup::{find_entry, find_entry_by_id, Entry};
pub use options::{Algorithm, Direction, EdgeRouting, LayoutOptions, NodePlacement, NodeSizes};
pub use smoothing::{PathCommand, PathDescriptor, PathSmoother};
pub use style::{EdgeStyle, NodeStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
