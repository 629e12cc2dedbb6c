use pretty_assertions::assert_eq;
use roadmap_engine::{
    read_tree, render_roadmap, update_status, EngineConfig, EngineError, ProgressReport,
    UpdateRequest,
};
use roadmap_graph::{EdgeKind, LayeredLayout, LayoutOptions};
use roadmap_model::{NodeKind, PhaseStatus, Status};
use roadmap_test_utils::sample_roadmap;
use std::io::Write;

#[tokio::test]
async fn sample_roadmap_renders_to_the_wire_payload() {
    let layout = render_roadmap(&sample_roadmap(), &LayeredLayout, &EngineConfig::default())
        .await
        .unwrap();

    let json = serde_json::to_value(&layout).unwrap();
    assert!(json["width"].as_f64().unwrap() > 0.0);
    assert_eq!(json["nodes"][0]["id"], "phase__foundations");
    assert_eq!(json["nodes"][0]["type"], "phase");
    assert_eq!(json["edges"][0]["id"], "e-0");
    assert_eq!(json["edges"][0]["type"], "main");

    for edge in &layout.edges {
        assert!(edge.path.starts_with("M "), "{} path {}", edge.id, edge.path);
        assert!(layout.node(&edge.source).is_some());
        assert!(layout.node(&edge.target).is_some());
    }
    for node in &layout.nodes {
        assert!(node.x + node.width + 40.0 <= layout.width);
        assert!(node.y + node.height + 40.0 <= layout.height);
    }

    let header = layout.node("extras__header").unwrap();
    assert_eq!(header.label, "Extras");
    assert_eq!(header.status, None);
    assert_eq!(header.kind, NodeKind::Phase);
}

#[tokio::test]
async fn related_fields_follow_the_config_flag() {
    let tree = sample_roadmap();
    let plain = render_roadmap(&tree, &LayeredLayout, &EngineConfig::default())
        .await
        .unwrap();
    assert!(plain.node("related__backend").is_none());

    let config = EngineConfig::from_toml_str("include_related = true").unwrap();
    let with_related = render_roadmap(&tree, &LayeredLayout, &config).await.unwrap();
    let related = with_related.node("related__backend").unwrap();
    assert_eq!(related.label, "Backend Development");
    assert!(with_related
        .edges
        .iter()
        .any(|edge| edge.target == "related__backend" && edge.kind == EdgeKind::Sub));
}

#[tokio::test]
async fn zero_corner_radius_keeps_sharp_corners() {
    let config = EngineConfig {
        corner_radius: 0.0,
        ..EngineConfig::default()
    };
    let layout = render_roadmap(&sample_roadmap(), &LayeredLayout, &config)
        .await
        .unwrap();
    assert!(layout.edges.iter().all(|edge| !edge.path.contains('Q')));
}

#[tokio::test]
async fn duplicate_ids_surface_as_a_layout_error() {
    let mut tree = sample_roadmap();
    let twin = tree.phases[0].topics[0].clone();
    tree.phases[1].topics.push(twin);

    let err = render_roadmap(&tree, &LayeredLayout, &EngineConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Layout(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn right_direction_is_wider_than_tall() {
    let config = EngineConfig {
        layout: LayoutOptions::default()
            .with_override("elk.direction", "RIGHT")
            .unwrap(),
        ..EngineConfig::default()
    };
    let layout = render_roadmap(&sample_roadmap(), &LayeredLayout, &config)
        .await
        .unwrap();
    assert!(layout.width > layout.height);
}

#[test]
fn updates_flow_through_the_facade() {
    let tree = sample_roadmap();
    let tree = ["css", "flexbox", "grid", "js"]
        .into_iter()
        .fold(tree, |tree, id| {
            update_status(UpdateRequest::new(tree, id, Status::Completed))
        });

    assert_eq!(tree.phases[0].status, PhaseStatus::Completed);
    let report = ProgressReport::of(&tree);
    assert_eq!((report.finished, report.total), (5, 10));
    assert_eq!(report.progress, tree.progress);
    assert_eq!(report.progress, 50);
}

#[test]
fn trees_are_read_from_json_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&sample_roadmap()).unwrap()).unwrap();
    assert_eq!(read_tree(file.path()).unwrap(), sample_roadmap());

    let mut broken = tempfile::NamedTempFile::new().unwrap();
    write!(broken, "{{\"phases\": 3}}").unwrap();
    assert!(matches!(read_tree(broken.path()), Err(EngineError::Json(_))));

    assert!(matches!(
        read_tree("/definitely/not/here.json"),
        Err(EngineError::Io(_))
    ));
}
