//! Render pipeline
//!
//! RoadmapTree → GraphBuilder → LayoutEngine → CanvasSizer, joined into
//! the payload the diagram renderer draws. The layout call is the only
//! suspension point.

use std::collections::HashMap;

use roadmap_graph::{
    EdgeKind, EdgeRoute, LayoutEngine, LayoutError, Point, PositionedNode, RoadmapGraph,
};
use roadmap_model::{NodeKind, RoadmapTree, Status};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;

/// Positioned node with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Polyline of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub start: Point,
    pub end: Point,
    pub bends: Vec<Point>,
}

/// Routed edge with its smoothed SVG path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEdge {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub route: Route,
    /// SVG `d` attribute with rounded corners
    pub path: String,
}

/// Everything the diagram renderer needs for one roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapLayout {
    /// Canvas width, margins included
    pub width: f64,
    /// Canvas height, margins included
    pub height: f64,
    pub nodes: Vec<RenderedNode>,
    pub edges: Vec<RenderedEdge>,
}

impl RoadmapLayout {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Lay out `tree` and size its canvas.
///
/// # Errors
/// [`EngineError::Layout`](crate::EngineError::Layout) if the engine fails
/// or returns a layout that does not cover every node and edge.
#[tracing::instrument(skip_all, fields(engine = engine.name(), phases = tree.phases.len()))]
pub async fn render_roadmap(
    tree: &RoadmapTree,
    engine: &dyn LayoutEngine,
    config: &EngineConfig,
) -> Result<RoadmapLayout> {
    let graph = config.graph_builder().build(tree);
    let layout = engine.layout(&graph, &config.layout).await?;
    let canvas = config.canvas_sizer().size(&layout);
    debug!(width = canvas.width, height = canvas.height, "canvas sized");

    let positions: HashMap<&str, &PositionedNode> =
        layout.nodes.iter().map(|node| (node.id.as_str(), node)).collect();
    let routes: HashMap<&str, &EdgeRoute> =
        layout.edges.iter().map(|route| (route.id.as_str(), route)).collect();

    let nodes = join_nodes(&graph, &positions)?;
    let smoother = config.path_smoother();
    let edges = graph
        .edges
        .iter()
        .map(|edge| {
            let route = routes.get(edge.id.as_str()).ok_or_else(|| {
                LayoutError::Engine(format!("layout is missing edge {}", edge.id))
            })?;
            Ok(RenderedEdge {
                id: edge.id.clone(),
                kind: edge.kind,
                source: edge.source.clone(),
                target: edge.target.clone(),
                route: Route {
                    start: route.start,
                    end: route.end,
                    bends: route.bends.to_vec(),
                },
                path: smoother.smooth_route(route).to_string(),
            })
        })
        .collect::<std::result::Result<Vec<_>, LayoutError>>()?;

    info!(nodes = nodes.len(), edges = edges.len(), "roadmap rendered");
    Ok(RoadmapLayout {
        width: canvas.width,
        height: canvas.height,
        nodes,
        edges,
    })
}

fn join_nodes(
    graph: &RoadmapGraph,
    positions: &HashMap<&str, &PositionedNode>,
) -> std::result::Result<Vec<RenderedNode>, LayoutError> {
    graph
        .nodes
        .iter()
        .map(|node| {
            let placed = positions.get(node.id.as_str()).ok_or_else(|| {
                LayoutError::Engine(format!("layout is missing node {}", node.id))
            })?;
            Ok(RenderedNode {
                id: node.id.clone(),
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                label: node.label.clone(),
                kind: node.kind,
                status: node.status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roadmap_graph::{LayeredLayout, LayoutOptions, LayoutResult};
    use roadmap_test_utils::two_topic_roadmap;

    /// Drops the last node from an otherwise valid layout.
    struct Broken;

    #[async_trait]
    impl LayoutEngine for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn layout(
            &self,
            graph: &RoadmapGraph,
            options: &LayoutOptions,
        ) -> std::result::Result<LayoutResult, LayoutError> {
            let mut result = LayeredLayout::compute(graph, options)?;
            result.nodes.pop();
            Ok(result)
        }
    }

    #[tokio::test]
    async fn renders_every_node_and_edge() {
        let layout = render_roadmap(&two_topic_roadmap(), &LayeredLayout, &EngineConfig::default())
            .await
            .unwrap();

        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.edges.len(), 2);
        assert_eq!(layout.node("topic__t1").unwrap().label, "Topic t1");
        assert_eq!(layout.edges[0].path, "M 162 72 L 162 112");
        // Layout extent 324x264, far node edge + 40, then + 40.
        assert_eq!((layout.width, layout.height), (392.0, 332.0));
    }

    #[tokio::test]
    async fn partial_layout_is_an_error() {
        let err = render_roadmap(&two_topic_roadmap(), &Broken, &EngineConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("topic__t2"));
        assert!(err.is_retryable());
    }
}
