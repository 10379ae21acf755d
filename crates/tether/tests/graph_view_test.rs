use tether::{
    CanvasBounds, Dataset, Error, FrameTasks, GraphView, LayoutConfig, NodeInfo, NodeState, Point,
    RelationshipDataset, ScoreDataset, SimilarityOptions, ViewMode,
};

fn dataset() -> Dataset {
    let mut d = RelationshipDataset::new("me")
        .item("ana", 12.0)
        .item("bo", 6.0)
        .item("cy", 2.0)
        .link("ana", "dee", 4.0);
    d.nodes.push(NodeInfo {
        id: "dee".to_string(),
        label: Some("Dee".to_string()),
        image_ref: None,
    });
    d.into()
}

fn view(mode: ViewMode) -> GraphView {
    GraphView::new(
        dataset(),
        mode,
        CanvasBounds::new(800.0, 600.0),
        LayoutConfig::default(),
        FrameTasks::new(),
    )
    .unwrap()
}

#[test]
fn scene_reflects_the_ego_layout() {
    let v = view(ViewMode::Ego);
    let scene = v.scene();
    assert_eq!(scene.bounds, CanvasBounds::new(800.0, 600.0));

    let ids: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["me", "dee", "ana", "bo", "cy"]);

    let me = scene.node("me").unwrap();
    assert!(me.is_subject);
    assert_eq!(me.visual_weight_hint, 1.0);
    assert_eq!((me.x, me.y), (400.0, 300.0));
    assert_eq!(scene.node("ana").unwrap().visual_weight_hint, 1.0);
    assert_eq!(scene.edges.len(), 4);
}

#[test]
fn frames_are_emitted_only_while_animating() {
    let mut v = view(ViewMode::Ego);
    assert!(v.on_frame(0.0).is_none());

    let home = v.layout().position("bo").unwrap();
    v.on_pointer_down("bo", home, 0.0).unwrap();
    let moved = v.on_pointer_move(home + Point::new(40.0, 25.0)).unwrap();
    let node = v.scene().node("bo").cloned().unwrap();
    assert_eq!((node.x, node.y), (moved.x, moved.y));
    assert!(v.on_frame(5.0).is_none(), "dragging alone does not animate");

    assert_eq!(v.on_pointer_up(10.0), Some(NodeState::Releasing));
    let mid = v.on_frame(200.0).unwrap();
    assert_ne!(mid.node("bo").map(|n| (n.x, n.y)), Some((home.x, home.y)));

    let last = v.on_frame(610.0).unwrap();
    let settled = last.node("bo").unwrap();
    assert_eq!((settled.x, settled.y), (home.x, home.y));
    assert!(v.on_frame(620.0).is_none());
}

#[test]
fn resizing_recomputes_and_resets_interaction() {
    let mut v = view(ViewMode::Ego);
    let home = v.layout().position("ana").unwrap();
    v.on_pointer_down("ana", home, 0.0).unwrap();
    v.on_pointer_move(home + Point::new(10.0, 10.0));

    v.set_bounds(CanvasBounds::new(400.0, 400.0)).unwrap();
    assert_eq!(v.layout().canvas.bounds, CanvasBounds::new(400.0, 400.0));
    assert!(v.controller().drag_session().is_none());
    assert_eq!(v.controller().state("ana"), NodeState::Idle);
    assert_eq!(
        v.controller().live_position("ana"),
        v.layout().position("ana")
    );
    assert_eq!(v.scene().node("me").map(|n| (n.x, n.y)), Some((200.0, 200.0)));
    assert!(v.on_pointer_move(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn invalid_bounds_keep_the_previous_layout() {
    let mut v = view(ViewMode::Ego);
    let before = v.layout().clone();
    let err = v.set_bounds(CanvasBounds::new(f64::NAN, 10.0)).unwrap_err();
    assert!(matches!(err, Error::InvalidCanvas { .. }));
    assert_eq!(v.layout(), &before);
    assert_eq!(v.bounds(), CanvasBounds::new(800.0, 600.0));
}

#[test]
fn switching_to_ambient_similarity_drops_edges() {
    let mut v = view(ViewMode::Ego);
    v.set_mode(ViewMode::Similarity).unwrap();
    assert_eq!(v.mode(), ViewMode::Similarity);

    let scene = v.scene();
    assert_eq!(scene.nodes.len(), 5);
    assert!(scene.edges.is_empty());
}

#[test]
fn search_config_filters_scored_items() {
    let scores = ScoreDataset::new("me")
        .item("sunset", 0.8)
        .item("lunch", 0.1)
        .item("boat", 0.45);
    let mut v = GraphView::new(
        scores.into(),
        ViewMode::Similarity,
        CanvasBounds::new(600.0, 600.0),
        LayoutConfig::default(),
        FrameTasks::new(),
    )
    .unwrap();
    assert_eq!(v.scene().nodes.len(), 4);

    let config = LayoutConfig {
        similarity: SimilarityOptions {
            min_threshold: Some(0.4),
            ..SimilarityOptions::default()
        },
        ..LayoutConfig::default()
    };
    v.set_config(config).unwrap();
    let scene = v.scene();
    let ids: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["me", "sunset", "boat"]);
    assert_eq!(scene.edges.len(), 2);
    assert!(matches!(
        v.on_pointer_down("lunch", Point::ZERO, 0.0),
        Err(Error::UnknownNode { .. })
    ));
}

#[test]
fn empty_dataset_renders_an_empty_scene() {
    let mut v = view(ViewMode::Global);
    v.set_dataset(RelationshipDataset::new("me").into()).unwrap();
    assert!(v.layout().is_empty());
    assert!(v.scene().is_empty());
    assert!(v.scene().edges.is_empty());
    assert!(v.on_frame(0.0).is_none());
}

#[test]
fn config_changes_apply_to_the_next_release() {
    let mut v = view(ViewMode::Ego);
    let config = LayoutConfig {
        interaction: tether::InteractionOptions { duration_ms: 0.0 },
        ..LayoutConfig::default()
    };
    v.set_config(config).unwrap();

    let home = v.layout().position("cy").unwrap();
    v.on_pointer_down("cy", home, 0.0).unwrap();
    v.on_pointer_move(home + Point::new(30.0, 0.0));
    assert_eq!(v.on_pointer_up(0.0), Some(NodeState::Idle));
    assert!(v.on_frame(16.0).is_none());
    assert_eq!(v.controller().live_position("cy"), Some(home));
}
