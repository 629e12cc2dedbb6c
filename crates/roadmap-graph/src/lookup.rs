//! Graph node back to the tree entry it was built from.

use roadmap_model::{NodeKind, Resource, ResourceCategory, RoadmapTree, Status, TopicOption};

use crate::builder::GraphNode;

/// Domain entry behind a selected graph node, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub kind: NodeKind,
    /// Raw tree id
    pub id: &'a str,
    pub title: &'a str,
    pub about: &'a str,
    pub status: Option<Status>,
    resources: &'a [Resource],
}

impl<'a> Entry<'a> {
    #[must_use]
    pub const fn resources(&self) -> &'a [Resource] {
        self.resources
    }

    /// Resources in one price bucket, in declaration order
    pub fn resources_in(
        &self,
        category: ResourceCategory,
    ) -> impl Iterator<Item = &'a Resource> + 'a {
        self.resources
            .iter()
            .filter(move |resource| resource.category == category)
    }

    fn option(option: &'a TopicOption) -> Self {
        Self {
            kind: NodeKind::Option,
            id: &option.id,
            title: &option.title,
            about: &option.about,
            status: Some(option.status.into()),
            resources: &option.resources,
        }
    }
}

/// Entry for the selected node, or `None` when nothing is selected or
/// the node has no tree counterpart (such as the extras header).
#[must_use]
pub fn find_entry<'a>(node: Option<&GraphNode>, tree: &'a RoadmapTree) -> Option<Entry<'a>> {
    find_entry_by_id(&node?.id, tree)
}

/// [`find_entry`] keyed by namespaced graph id.
#[must_use]
pub fn find_entry_by_id<'a>(graph_id: &str, tree: &'a RoadmapTree) -> Option<Entry<'a>> {
    let (kind, raw) = NodeKind::parse_graph_id(graph_id)?;

    match kind {
        NodeKind::Phase => tree.phase(raw).map(|phase| Entry {
            kind,
            id: &phase.id,
            title: &phase.title,
            about: &phase.about,
            status: Some(phase.status.into()),
            resources: &[],
        }),
        NodeKind::Topic => tree
            .phases
            .iter()
            .flat_map(|phase| &phase.topics)
            .find(|topic| topic.id == raw)
            .map(|topic| Entry {
                kind,
                id: &topic.id,
                title: &topic.title,
                about: &topic.about,
                status: Some(topic.status.into()),
                resources: &topic.resources,
            }),
        NodeKind::Option => {
            let under_topics = tree
                .phases
                .iter()
                .flat_map(|phase| &phase.topics)
                .flat_map(|topic| &topic.options);
            let under_extras = tree.extras.iter().flat_map(|extra| &extra.options);
            under_topics
                .chain(under_extras)
                .find(|option| option.id == raw)
                .map(Entry::option)
        }
        NodeKind::Checkpoint => tree
            .checkpoints
            .iter()
            .find(|checkpoint| checkpoint.id == raw)
            .map(|checkpoint| Entry {
                kind,
                id: &checkpoint.id,
                title: checkpoint.for_phase.as_deref().unwrap_or(&checkpoint.about),
                about: &checkpoint.about,
                status: None,
                resources: &[],
            }),
        NodeKind::Extra => tree.extras.iter().find(|extra| extra.id == raw).map(|extra| Entry {
            kind,
            id: &extra.id,
            title: &extra.title,
            about: &extra.about,
            status: Some(extra.status.into()),
            resources: &extra.resources,
        }),
        NodeKind::Related => tree
            .related_fields
            .iter()
            .find(|field| field.id == raw)
            .map(|field| Entry {
                kind,
                id: &field.id,
                title: &field.title,
                about: "",
                status: None,
                resources: &[],
            }),
    }
}
