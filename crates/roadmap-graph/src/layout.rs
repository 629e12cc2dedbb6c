//! Layout engine seam and the built-in layered engine
//!
//! [`LayoutEngine`] is the async boundary the render pipeline awaits.
//! [`LayeredLayout`] implements it in-process:
//!
//! 1. validate ids and endpoints, reject cycles (petgraph toposort)
//! 2. longest-path layering
//! 3. per-layer placement across the flow
//! 4. orthogonal or straight edge routes
//!
//! All coordinates are computed in flow-relative axes (`breadth` across
//! the flow, `depth` along it) and mapped to x/y at the end, so both
//! directions share one code path.

use async_trait::async_trait;
use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction as Adjacency;
use roadmap_model::NodeKind;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::builder::{EdgeKind, RoadmapGraph};
use crate::error::LayoutError;
use crate::geometry::Point;
use crate::options::{Direction, EdgeRouting, LayoutOptions, NodePlacement};

const EPSILON: f64 = 1e-9;

/// Node with its final box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Route of one edge: `start`, then `bends`, then `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRoute {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub bends: SmallVec<[Point; 2]>,
}

impl EdgeRoute {
    /// Ordered polyline `[start, ..bends, end]`
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.bends.iter().copied())
            .chain(std::iter::once(self.end))
            .collect()
    }
}

/// Coordinates for every node and a route for every edge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<EdgeRoute>,
    /// Extent of the laid-out graph including padding
    pub width: f64,
    pub height: f64,
}

impl LayoutResult {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&EdgeRoute> {
        self.edges.iter().find(|edge| edge.id == id)
    }
}

/// Assigns coordinates and edge routes to a graph.
///
/// Implementations must be deterministic and must never return a partial
/// layout: either every node and edge is placed or the call fails.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Lay out `graph`.
    ///
    /// # Errors
    /// A single [`LayoutError`] for malformed or cyclic input, bad options
    /// or backend failure.
    async fn layout(
        &self,
        graph: &RoadmapGraph,
        options: &LayoutOptions,
    ) -> Result<LayoutResult, LayoutError>;
}

/// Built-in layered layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

#[async_trait]
impl LayoutEngine for LayeredLayout {
    fn name(&self) -> &'static str {
        "layered"
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(nodes = graph.nodes.len(), edges = graph.edges.len())
    )]
    async fn layout(
        &self,
        graph: &RoadmapGraph,
        options: &LayoutOptions,
    ) -> Result<LayoutResult, LayoutError> {
        let result = Self::compute(graph, options)?;
        debug!(width = result.width, height = result.height, "layout complete");
        Ok(result)
    }
}

/// Validated graph in petgraph form. Node weights are indices into
/// `RoadmapGraph::nodes`; insertion order makes them equal to the
/// petgraph index.
struct Indexed {
    dag: DiGraph<usize, EdgeKind>,
    edges: Vec<(NodeIndex, NodeIndex)>,
}

impl Indexed {
    fn new(graph: &RoadmapGraph) -> Result<Self, LayoutError> {
        let mut ids: IndexMap<&str, NodeIndex> = IndexMap::with_capacity(graph.nodes.len());
        let mut dag = DiGraph::with_capacity(graph.nodes.len(), graph.edges.len());

        for (i, node) in graph.nodes.iter().enumerate() {
            if ids.contains_key(node.id.as_str()) {
                return Err(LayoutError::DuplicateNode(node.id.clone()));
            }
            ids.insert(&node.id, dag.add_node(i));
        }

        let endpoint = |edge_id: &str, node_id: &str| {
            ids.get(node_id).copied().ok_or_else(|| LayoutError::UnknownEndpoint {
                edge: edge_id.to_string(),
                node: node_id.to_string(),
            })
        };

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let source = endpoint(&edge.id, &edge.source)?;
            let target = endpoint(&edge.id, &edge.target)?;
            dag.add_edge(source, target, edge.kind);
            edges.push((source, target));
        }

        Ok(Self { dag, edges })
    }

    /// Longest-path layer of every node.
    fn layers(&self, graph: &RoadmapGraph) -> Result<Vec<usize>, LayoutError> {
        let order = toposort(&self.dag, None).map_err(|cycle| LayoutError::Cyclic {
            node: graph.nodes[self.dag[cycle.node_id()]].id.clone(),
        })?;

        let mut layer = vec![0; self.dag.node_count()];
        for ix in order {
            let depth = self
                .dag
                .neighbors_directed(ix, Adjacency::Incoming)
                .map(|pred| layer[pred.index()] + 1)
                .max()
                .unwrap_or(0);
            layer[ix.index()] = depth;
        }
        Ok(layer)
    }

    fn main_predecessor(&self, ix: NodeIndex) -> Option<NodeIndex> {
        self.dag
            .edges_directed(ix, Adjacency::Incoming)
            .filter(|edge| *edge.weight() == EdgeKind::Main)
            .map(|edge| edge.source())
            .min()
    }

    fn predecessors(&self, ix: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.dag.neighbors_directed(ix, Adjacency::Incoming)
    }
}

/// Box extents in flow-relative axes.
#[derive(Debug, Clone, Copy)]
struct Extent {
    breadth: f64,
    depth: f64,
}

impl LayeredLayout {
    /// Synchronous core of [`LayoutEngine::layout`].
    ///
    /// # Errors
    /// [`LayoutError::DuplicateNode`], [`LayoutError::UnknownEndpoint`] or
    /// [`LayoutError::Cyclic`].
    pub fn compute(
        graph: &RoadmapGraph,
        options: &LayoutOptions,
    ) -> Result<LayoutResult, LayoutError> {
        let indexed = Indexed::new(graph)?;
        let layer = indexed.layers(graph)?;

        let extents: Vec<Extent> = graph
            .nodes
            .iter()
            .map(|node| {
                let size = options.node_sizes.get(node.kind);
                match options.direction {
                    Direction::Down => Extent { breadth: size.width, depth: size.height },
                    Direction::Right => Extent { breadth: size.height, depth: size.width },
                }
            })
            .collect();

        let row_count = layer.iter().max().map_or(0, |deepest| deepest + 1);
        let mut rows: Vec<Vec<NodeIndex>> = vec![Vec::new(); row_count];
        for ix in indexed.dag.node_indices() {
            rows[layer[ix.index()]].push(ix);
        }

        let centers = place_breadth(&indexed, &rows, &extents, options);
        let tops = place_depth(&rows, &layer, &extents, options.spacing_between_layers);

        // Shift so the top-left-most box sits exactly at the padding.
        let min_breadth = extents
            .iter()
            .zip(&centers)
            .map(|(extent, center)| center - extent.breadth / 2.0)
            .fold(f64::INFINITY, f64::min);
        let min_depth = tops.iter().copied().fold(f64::INFINITY, f64::min);
        let shift = |min: f64| if min.is_finite() { options.padding - min } else { 0.0 };
        let (shift_breadth, shift_depth) = (shift(min_breadth), shift(min_depth));

        let to_point = |breadth: f64, depth: f64| match options.direction {
            Direction::Down => Point::new(breadth + shift_breadth, depth + shift_depth),
            Direction::Right => Point::new(depth + shift_depth, breadth + shift_breadth),
        };

        let nodes: Vec<PositionedNode> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let corner = to_point(centers[i] - extents[i].breadth / 2.0, tops[i]);
                let size = options.node_sizes.get(node.kind);
                PositionedNode {
                    id: node.id.clone(),
                    kind: node.kind,
                    x: corner.x,
                    y: corner.y,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .zip(&indexed.edges)
            .map(|(edge, (source, target))| {
                let (s, t) = (source.index(), target.index());
                let start = (centers[s], tops[s] + extents[s].depth);
                let end = (centers[t], tops[t]);

                let mut bends = SmallVec::new();
                if options.edge_routing == EdgeRouting::Orthogonal
                    && (start.0 - end.0).abs() > EPSILON
                {
                    let mid = (start.1 + end.1) / 2.0;
                    bends.push(to_point(start.0, mid));
                    bends.push(to_point(end.0, mid));
                }

                EdgeRoute {
                    id: edge.id.clone(),
                    kind: edge.kind,
                    start: to_point(start.0, start.1),
                    end: to_point(end.0, end.1),
                    bends,
                }
            })
            .collect();

        let width = nodes
            .iter()
            .map(|node| node.x + node.width)
            .fold(options.padding, f64::max)
            + options.padding;
        let height = nodes
            .iter()
            .map(|node| node.y + node.height)
            .fold(options.padding, f64::max)
            + options.padding;

        Ok(LayoutResult { nodes, edges, width, height })
    }
}

/// Breadth-axis center of every node, layer by layer.
fn place_breadth(
    indexed: &Indexed,
    rows: &[Vec<NodeIndex>],
    extents: &[Extent],
    options: &LayoutOptions,
) -> Vec<f64> {
    let spacing = options.spacing_node_node;
    let mut centers = vec![0.0; extents.len()];

    for row in rows {
        let barycenter = |ix: NodeIndex, centers: &[f64]| {
            let (sum, count) = indexed
                .predecessors(ix)
                .fold((0.0, 0_u32), |(sum, count), pred| (sum + centers[pred.index()], count + 1));
            if count == 0 { 0.0 } else { sum / f64::from(count) }
        };

        match options.node_placement {
            NodePlacement::Packed => {
                let mut cursor = 0.0;
                for ix in row {
                    let extent = extents[ix.index()].breadth;
                    centers[ix.index()] = cursor + extent / 2.0;
                    cursor += extent + spacing;
                }
            }
            NodePlacement::Aligned => {
                let (anchors, mut branches): (Vec<NodeIndex>, Vec<NodeIndex>) =
                    row.iter().copied().partition(|ix| {
                        indexed.main_predecessor(*ix).is_some()
                            || indexed.predecessors(*ix).next().is_none()
                    });
                branches.sort_by(|a, b| {
                    barycenter(*a, &centers).total_cmp(&barycenter(*b, &centers))
                });

                // Occupied span of the row so far.
                let mut span: Option<(f64, f64)> = None;

                for ix in anchors {
                    let half = extents[ix.index()].breadth / 2.0;
                    let wanted = indexed
                        .main_predecessor(ix)
                        .map_or(0.0, |pred| centers[pred.index()]);
                    let center = match span {
                        Some((_, right)) => wanted.max(right + spacing + half),
                        None => wanted,
                    };
                    centers[ix.index()] = center;
                    span = Some(span.map_or((center - half, center + half), |(left, right)| {
                        (left.min(center - half), right.max(center + half))
                    }));
                }

                for (k, ix) in branches.into_iter().enumerate() {
                    let half = extents[ix.index()].breadth / 2.0;
                    let go_left = options.allow_side_switch && k % 2 == 1;
                    let center = match span {
                        None => barycenter(ix, &centers),
                        Some((left, _)) if go_left => left - spacing - half,
                        Some((_, right)) => right + spacing + half,
                    };
                    centers[ix.index()] = center;
                    span = Some(span.map_or((center - half, center + half), |(left, right)| {
                        (left.min(center - half), right.max(center + half))
                    }));
                }
            }
        }
    }

    centers
}

/// Depth-axis top of every node. Each box is centered in its layer band.
fn place_depth(rows: &[Vec<NodeIndex>], layer: &[usize], extents: &[Extent], gap: f64) -> Vec<f64> {
    let bands: Vec<f64> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|ix| extents[ix.index()].depth)
                .fold(0.0, f64::max)
        })
        .collect();

    let starts: Vec<f64> = bands
        .iter()
        .scan(0.0, |next, band| {
            let start = *next;
            *next += band + gap;
            Some(start)
        })
        .collect();

    extents
        .iter()
        .zip(layer)
        .map(|(extent, l)| starts[*l] + (bands[*l] - extent.depth) / 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_graph, GraphEdge, GraphNode};
    use pretty_assertions::assert_eq;
    use roadmap_model::{NodeStatus, PhaseStatus};
    use roadmap_test_utils::{option, phase, roadmap, topic, topic_with_options, two_topic_roadmap};

    fn branching_graph() -> RoadmapGraph {
        build_graph(&roadmap(vec![phase(
            "p",
            PhaseStatus::Pending,
            vec![
                topic_with_options(
                    "t",
                    NodeStatus::Pending,
                    vec![option("o1", NodeStatus::Pending), option("o2", NodeStatus::Pending)],
                ),
                topic("u", NodeStatus::Pending),
            ],
        )]))
    }

    fn node(id: &str, kind: NodeKind) -> GraphNode {
        GraphNode {
            id: id.into(),
            kind,
            label: id.into(),
            status: None,
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Main,
        }
    }

    #[test]
    fn chain_is_stacked_and_centered() {
        let result =
            LayeredLayout::compute(&two_topic_roadmap_graph(), &LayoutOptions::default()).unwrap();

        let phase = result.node("phase__p1").unwrap();
        let t1 = result.node("topic__t1").unwrap();
        let t2 = result.node("topic__t2").unwrap();
        assert_eq!((phase.x, phase.y), (12.0, 12.0));
        assert_eq!((t1.x, t1.y), (72.0, 112.0));
        assert_eq!((t2.x, t2.y), (72.0, 202.0));
        assert_eq!((result.width, result.height), (324.0, 264.0));

        let route = result.edge("e-0").unwrap();
        assert_eq!(route.start, Point::new(162.0, 72.0));
        assert_eq!(route.end, Point::new(162.0, 112.0));
        assert!(route.bends.is_empty());
    }

    fn two_topic_roadmap_graph() -> RoadmapGraph {
        build_graph(&two_topic_roadmap())
    }

    #[test]
    fn branches_alternate_sides_of_the_spine() {
        let result = LayeredLayout::compute(&branching_graph(), &LayoutOptions::default()).unwrap();

        let t = result.node("topic__t").unwrap();
        let u = result.node("topic__u").unwrap();
        let o1 = result.node("option__o1").unwrap();
        let o2 = result.node("option__o2").unwrap();

        assert_eq!(u.x, t.x);
        assert_eq!(o1.y + o1.height / 2.0, u.y + u.height / 2.0);
        assert!(o1.x >= u.x + u.width + 50.0);
        assert!(o2.x + o2.width + 50.0 <= u.x);
    }

    #[test]
    fn branches_stay_on_one_side_without_side_switch() {
        let options = LayoutOptions::default().with_side_switch(false);
        let result = LayeredLayout::compute(&branching_graph(), &options).unwrap();

        let u = result.node("topic__u").unwrap();
        let o1 = result.node("option__o1").unwrap();
        let o2 = result.node("option__o2").unwrap();
        assert!(o1.x > u.x);
        assert!(o2.x > o1.x + o1.width);
    }

    #[test]
    fn orthogonal_branch_routes_bend_between_layers() {
        let result = LayeredLayout::compute(&branching_graph(), &LayoutOptions::default()).unwrap();
        let t = result.node("topic__t").unwrap();
        let o1 = result.node("option__o1").unwrap();
        let route = result
            .edges
            .iter()
            .find(|route| route.kind == EdgeKind::Sub)
            .unwrap();

        let points = route.points();
        assert_eq!(points.len(), 4);
        for pair in points.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
        assert_eq!(route.start.y, t.y + t.height);
        assert_eq!(route.end, Point::new(o1.x + o1.width / 2.0, o1.y));
    }

    #[test]
    fn polyline_routes_are_straight() {
        let options = LayoutOptions::default().with_edge_routing(EdgeRouting::Polyline);
        let result = LayeredLayout::compute(&branching_graph(), &options).unwrap();
        assert!(result.edges.iter().all(|route| route.bends.is_empty()));
    }

    #[test]
    fn right_direction_flows_along_x() {
        let options = LayoutOptions::default().with_direction(Direction::Right);
        let result = LayeredLayout::compute(&two_topic_roadmap_graph(), &options).unwrap();

        let phase = result.node("phase__p1").unwrap();
        let t1 = result.node("topic__t1").unwrap();
        let t2 = result.node("topic__t2").unwrap();
        assert!(phase.x + phase.width < t1.x);
        assert!(t1.x + t1.width < t2.x);
        assert_eq!(phase.y + phase.height / 2.0, t1.y + t1.height / 2.0);
        assert_eq!(phase.x, 12.0);
    }

    #[test]
    fn packed_rows_start_at_the_padding() {
        let options = LayoutOptions::default().with_node_placement(NodePlacement::Packed);
        let result = LayeredLayout::compute(&branching_graph(), &options).unwrap();

        let o1 = result.node("option__o1").unwrap();
        let o2 = result.node("option__o2").unwrap();
        let u = result.node("topic__u").unwrap();
        assert_eq!(o1.x, 12.0);
        assert_eq!(o2.x, o1.x + o1.width + 50.0);
        assert_eq!(u.x, o2.x + o2.width + 50.0);
    }

    #[test]
    fn empty_graph_is_just_padding() {
        let result =
            LayeredLayout::compute(&RoadmapGraph::default(), &LayoutOptions::default()).unwrap();
        assert!(result.nodes.is_empty());
        assert_eq!((result.width, result.height), (24.0, 24.0));
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let graph = RoadmapGraph {
            nodes: vec![node("a", NodeKind::Topic), node("a", NodeKind::Topic)],
            edges: Vec::new(),
        };
        assert_eq!(
            LayeredLayout::compute(&graph, &LayoutOptions::default()),
            Err(LayoutError::DuplicateNode("a".into()))
        );
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let graph = RoadmapGraph {
            nodes: vec![node("a", NodeKind::Topic)],
            edges: vec![edge("e-0", "a", "ghost")],
        };
        assert_eq!(
            LayeredLayout::compute(&graph, &LayoutOptions::default()),
            Err(LayoutError::UnknownEndpoint {
                edge: "e-0".into(),
                node: "ghost".into()
            })
        );
    }

    #[test]
    fn cycle_is_rejected() {
        let graph = RoadmapGraph {
            nodes: vec![node("a", NodeKind::Topic), node("b", NodeKind::Topic)],
            edges: vec![edge("e-0", "a", "b"), edge("e-1", "b", "a")],
        };
        let err = LayeredLayout::compute(&graph, &LayoutOptions::default()).unwrap_err();
        assert!(matches!(err, LayoutError::Cyclic { .. }));
    }

    #[tokio::test]
    async fn engine_trait_delegates_to_compute() {
        let engine: &dyn LayoutEngine = &LayeredLayout;
        let graph = branching_graph();
        let options = LayoutOptions::default();

        let via_trait = engine.layout(&graph, &options).await.unwrap();
        assert_eq!(via_trait, LayeredLayout::compute(&graph, &options).unwrap());
        assert_eq!(engine.name(), "layered");
    }
}
