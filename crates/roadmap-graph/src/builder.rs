//! Tree to graph flattening
//!
//! The tree is turned into an ordered list of [`Step`]s and folded into a
//! [`RoadmapGraph`]. The accumulator carries the node list, the edge list,
//! the tail of the main spine and the edge counter; nothing outside the
//! fold is mutated.

use std::collections::HashSet;

use roadmap_model::{Extra, NodeKind, Phase, RoadmapNode, RoadmapTree, Status, TopicOption};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Graph id of the synthetic node that opens the extras section
pub const EXTRAS_HEADER_ID: &str = "extras__header";

/// Label of the synthetic extras header
pub const EXTRAS_HEADER_LABEL: &str = "Extras";

/// Structural class of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Part of the main spine
    Main,
    /// Branch off the spine
    Sub,
}

/// Flat graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Namespaced id, `<kind>__<raw id>`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl GraphNode {
    fn from_tree(node: RoadmapNode<'_>) -> Self {
        Self {
            id: node.kind().graph_id(node.id()),
            kind: node.kind(),
            label: node.label().to_string(),
            status: node.status(),
        }
    }

    fn extras_header() -> Self {
        Self {
            id: EXTRAS_HEADER_ID.to_string(),
            kind: NodeKind::Phase,
            label: EXTRAS_HEADER_LABEL.to_string(),
            status: None,
        }
    }
}

/// Directed edge between two graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// `e-<n>`, unique within one build only
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Output of [`GraphBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RoadmapGraph {
    /// Node by graph id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Ids along the main spine, head to tail.
    ///
    /// Follows `main` edges from the single node with no incoming main
    /// edge. Empty for an empty graph.
    #[must_use]
    pub fn spine(&self) -> Vec<&str> {
        let mains: Vec<&GraphEdge> = self
            .edges
            .iter()
            .filter(|edge| edge.kind == EdgeKind::Main)
            .collect();
        let targets: HashSet<&str> = mains.iter().map(|edge| edge.target.as_str()).collect();

        let Some(head) = self
            .nodes
            .iter()
            .find(|node| node.kind != NodeKind::Option && !targets.contains(node.id.as_str()))
        else {
            return Vec::new();
        };

        let mut spine = vec![head.id.as_str()];
        while let Some(next) = spine
            .last()
            .and_then(|tail| mains.iter().find(|edge| edge.source == *tail))
        {
            spine.push(next.target.as_str());
        }
        spine
    }
}

/// One unit of graph construction.
#[derive(Debug)]
enum Step {
    /// Append to the spine with a main edge from the current tail
    Spine(GraphNode),
    /// Branch off `parent` with a sub edge; the spine is unchanged
    Branch { parent: String, node: GraphNode },
    /// Branch off whatever node is the spine tail at this point
    Hang(GraphNode),
}

#[derive(Debug, Default)]
struct Acc {
    graph: RoadmapGraph,
    tail: Option<String>,
    next_edge: usize,
}

impl Acc {
    fn link(mut self, source: String, target: String, kind: EdgeKind) -> Self {
        self.graph.edges.push(GraphEdge {
            id: format!("e-{}", self.next_edge),
            source,
            target,
            kind,
        });
        self.next_edge += 1;
        self
    }

    fn apply(self, step: Step) -> Self {
        match step {
            Step::Spine(node) => {
                let id = node.id.clone();
                let mut acc = match self.tail.clone() {
                    Some(tail) => self.link(tail, id.clone(), EdgeKind::Main),
                    None => self,
                };
                acc.graph.nodes.push(node);
                acc.tail = Some(id);
                acc
            }
            Step::Branch { parent, node } => {
                let id = node.id.clone();
                let mut acc = self.link(parent, id, EdgeKind::Sub);
                acc.graph.nodes.push(node);
                acc
            }
            Step::Hang(node) => {
                let id = node.id.clone();
                let mut acc = match self.tail.clone() {
                    Some(tail) => self.link(tail, id, EdgeKind::Sub),
                    None => self,
                };
                acc.graph.nodes.push(node);
                acc
            }
        }
    }
}

/// Flattens a [`RoadmapTree`] into a [`RoadmapGraph`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    include_related: bool,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hang related fields off the end of the spine
    #[must_use]
    pub fn with_related(mut self, include_related: bool) -> Self {
        self.include_related = include_related;
        self
    }

    /// Build the graph. Deterministic for a given tree, edge ids included.
    #[tracing::instrument(level = "debug", skip_all, fields(phases = tree.phases.len()))]
    #[must_use]
    pub fn build(&self, tree: &RoadmapTree) -> RoadmapGraph {
        for checkpoint in &tree.checkpoints {
            if tree.phase(&checkpoint.phase_id).is_none() {
                warn!(
                    checkpoint = %checkpoint.id,
                    phase_id = %checkpoint.phase_id,
                    "checkpoint references unknown phase, not drawn"
                );
            }
        }

        let phases = tree.phases.iter().flat_map(|phase| phase_steps(tree, phase));
        let extras_header = (!tree.extras.is_empty())
            .then(|| Step::Spine(GraphNode::extras_header()));
        let extras = tree.extras.iter().flat_map(extra_steps);
        let related = tree
            .related_fields
            .iter()
            .filter(|_| self.include_related)
            .map(|field| Step::Hang(GraphNode::from_tree(RoadmapNode::Related(field))));

        let acc = phases
            .chain(extras_header)
            .chain(extras)
            .chain(related)
            .fold(Acc::default(), Acc::apply);

        debug!(
            nodes = acc.graph.nodes.len(),
            edges = acc.graph.edges.len(),
            "graph built"
        );
        acc.graph
    }
}

fn phase_steps<'a>(tree: &'a RoadmapTree, phase: &'a Phase) -> impl Iterator<Item = Step> + 'a {
    let head = Step::Spine(GraphNode::from_tree(RoadmapNode::Phase(phase)));
    let topics = phase.topics.iter().flat_map(|topic| {
        let node = GraphNode::from_tree(RoadmapNode::Topic(topic));
        let parent = node.id.clone();
        std::iter::once(Step::Spine(node)).chain(option_steps(parent, &topic.options))
    });
    let checkpoints = tree
        .checkpoints_for(&phase.id)
        .map(|checkpoint| Step::Spine(GraphNode::from_tree(RoadmapNode::Checkpoint(checkpoint))));

    std::iter::once(head).chain(topics).chain(checkpoints)
}

fn extra_steps(extra: &Extra) -> impl Iterator<Item = Step> + '_ {
    let node = GraphNode::from_tree(RoadmapNode::Extra(extra));
    let parent = node.id.clone();
    std::iter::once(Step::Spine(node)).chain(option_steps(parent, &extra.options))
}

fn option_steps(parent: String, options: &[TopicOption]) -> impl Iterator<Item = Step> + '_ {
    options.iter().map(move |option| Step::Branch {
        parent: parent.clone(),
        node: GraphNode::from_tree(RoadmapNode::Option(option)),
    })
}

/// [`GraphBuilder::build`] with default settings
#[must_use]
pub fn build_graph(tree: &RoadmapTree) -> RoadmapGraph {
    GraphBuilder::new().build(tree)
}
