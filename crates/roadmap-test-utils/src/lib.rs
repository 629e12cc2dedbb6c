//! Testing utilities for the roadmap workspace
//!
//! Shared fixtures and tree constructors.

#![allow(missing_docs)]

pub mod strategies;

use roadmap_model::{
    Checkpoint, Extra, Faq, Meta, NodeStatus, Phase, PhaseStatus, RelatedField, Resource,
    ResourceCategory, ResourceKind, RoadmapTree, Topic, TopicKind, TopicOption, UserContext,
};

pub fn topic(id: &str, status: NodeStatus) -> Topic {
    Topic {
        id: id.to_string(),
        title: format!("Topic {id}"),
        kind: TopicKind::Core,
        status,
        about: format!("About {id}"),
        resources: Vec::new(),
        options: Vec::new(),
    }
}

pub fn topic_with_options(id: &str, status: NodeStatus, options: Vec<TopicOption>) -> Topic {
    Topic {
        options,
        ..topic(id, status)
    }
}

pub fn option(id: &str, status: NodeStatus) -> TopicOption {
    TopicOption {
        id: id.to_string(),
        title: format!("Option {id}"),
        kind: TopicKind::Optional,
        status,
        about: format!("About {id}"),
        resources: Vec::new(),
    }
}

pub fn phase(id: &str, status: PhaseStatus, topics: Vec<Topic>) -> Phase {
    Phase {
        id: id.to_string(),
        title: format!("Phase {id}"),
        about: format!("About {id}"),
        status,
        topics,
    }
}

pub fn checkpoint(id: &str, phase_id: &str) -> Checkpoint {
    Checkpoint {
        id: id.to_string(),
        phase_id: phase_id.to_string(),
        for_phase: Some(format!("Phase {phase_id}")),
        about: format!("Checkpoint {id}"),
    }
}

pub fn extra(id: &str, status: NodeStatus, options: Vec<TopicOption>) -> Extra {
    Extra {
        id: id.to_string(),
        title: format!("Extra {id}"),
        status,
        about: format!("About {id}"),
        resources: Vec::new(),
        options,
    }
}

pub fn resource(id: &str, category: ResourceCategory) -> Resource {
    Resource {
        id: id.to_string(),
        kind: ResourceKind::Article,
        title: format!("Resource {id}"),
        url: format!("https://example.com/{id}"),
        category,
    }
}

pub fn roadmap(phases: Vec<Phase>) -> RoadmapTree {
    RoadmapTree {
        meta: Meta {
            title: "Test Roadmap".to_string(),
            about: "Fixture".to_string(),
            user_context: UserContext::default(),
        },
        phases,
        ..RoadmapTree::default()
    }
}

/// One pending phase `p1` with pending topics `t1` and `t2`.
pub fn two_topic_roadmap() -> RoadmapTree {
    roadmap(vec![phase(
        "p1",
        PhaseStatus::Pending,
        vec![topic("t1", NodeStatus::Pending), topic("t2", NodeStatus::Pending)],
    )])
}

/// Two phases with options, checkpoints, extras, related fields and FAQs.
pub fn sample_roadmap() -> RoadmapTree {
    let mut html = topic("html", NodeStatus::Completed);
    html.resources = vec![
        resource("mdn", ResourceCategory::Free),
        resource("course", ResourceCategory::Paid),
    ];

    let mut tree = roadmap(vec![
        phase(
            "foundations",
            PhaseStatus::Active,
            vec![
                html,
                topic_with_options(
                    "css",
                    NodeStatus::Progress,
                    vec![
                        option("flexbox", NodeStatus::Pending),
                        option("grid", NodeStatus::Pending),
                    ],
                ),
                topic("js", NodeStatus::Pending),
            ],
        ),
        phase(
            "frameworks",
            PhaseStatus::Pending,
            vec![topic_with_options(
                "react",
                NodeStatus::Pending,
                vec![option("hooks", NodeStatus::Pending)],
            )],
        ),
    ]);
    tree.checkpoints = vec![
        checkpoint("cp-static-site", "foundations"),
        checkpoint("cp-interactive", "foundations"),
        checkpoint("cp-spa", "frameworks"),
    ];
    tree.extras = vec![
        extra("perf", NodeStatus::Pending, vec![option("lighthouse", NodeStatus::Pending)]),
        extra("testing", NodeStatus::Pending, Vec::new()),
    ];
    tree.related_fields = vec![RelatedField {
        id: "backend".to_string(),
        title: "Backend Development".to_string(),
    }];
    tree.faqs = vec![Faq {
        id: "faq-1".to_string(),
        question: "How long does this take?".to_string(),
        answer: "A few months.".to_string(),
    }];
    tree
}

/// Panics with the violations if the tree breaks a structural invariant.
pub fn assert_invariants(tree: &RoadmapTree) {
    if let Err(violations) = tree.check_invariants() {
        panic!("roadmap invariants violated: {violations:?}");
    }
}
