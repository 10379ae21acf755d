use tether::{
    Algorithm, Canvas, CanvasBounds, LayoutResult, Scene, ScoreDataset, SimilarityOptions, layout,
};

fn canvas() -> Canvas {
    Canvas::new(CanvasBounds::new(1000.0, 800.0), 24.0)
}

fn search(dataset: &ScoreDataset, opts: SimilarityOptions) -> (Algorithm, LayoutResult) {
    let algorithm = Algorithm::Similarity(opts);
    let result = layout(&dataset.to_graph(), canvas(), &algorithm).unwrap();
    (algorithm, result)
}

fn scored(threshold: f64) -> SimilarityOptions {
    SimilarityOptions {
        min_threshold: Some(threshold),
        ..SimilarityOptions::default()
    }
}

fn results() -> ScoreDataset {
    ScoreDataset::new("me")
        .item("beach", 0.92)
        .item("dinner", 0.31)
        .item("hike", 0.64)
        .item("party", 0.49)
        .item("concert", 0.5)
}

#[test]
fn items_below_the_threshold_never_appear() {
    let dataset = results();
    let (algorithm, result) = search(&dataset, scored(0.5));

    let ids: Vec<&str> = result.positions.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["me", "beach", "hike", "concert"]);

    let scene = Scene::build(
        &dataset.to_graph(),
        &result.positions,
        canvas().bounds,
        algorithm.weight_hints(),
    );
    assert!(scene.node("dinner").is_none());
    assert!(scene.node("party").is_none());
    assert!(
        scene
            .edges
            .iter()
            .all(|e| e.to_id != "dinner" && e.to_id != "party")
    );
    assert_eq!(scene.node("beach").unwrap().visual_weight_hint, 0.92);
}

#[test]
fn more_relevant_items_sit_closer() {
    let (_, result) = search(&results(), scored(0.3));
    let center = canvas().center();
    let d = |id: &str| result.position(id).unwrap().distance(center);
    assert_eq!(result.position("me"), Some(center));
    assert!(d("beach") < d("hike"));
    assert!(d("hike") < d("concert"));
    assert!(d("concert") < d("party"));
    assert!(d("party") < d("dinner"));
}

#[test]
fn survivors_are_spread_evenly_by_angle() {
    let (_, result) = search(&results(), scored(0.0));
    let center = canvas().center();
    let ids = ["beach", "dinner", "hike", "party", "concert"];
    for (k, id) in ids.iter().enumerate() {
        let expected = std::f64::consts::TAU * k as f64 / ids.len() as f64;
        let actual = (result.position(id).unwrap() - center)
            .angle()
            .rem_euclid(std::f64::consts::TAU);
        assert!((actual - expected).abs() < 1e-9, "{id}: {actual} vs {expected}");
    }
}

#[test]
fn full_threshold_places_survivors_at_the_minimum_distance() {
    let dataset = ScoreDataset::new("me").item("exact", 1.0).item("close", 0.99);
    let (_, result) = search(&dataset, scored(1.0));
    assert_eq!(result.len(), 2);

    let opts = SimilarityOptions::default();
    let expected = opts.min_distance * canvas().available_radius();
    let d = result.position("exact").unwrap().distance(canvas().center());
    assert!((d - expected).abs() < 1e-9);
}

#[test]
fn threshold_above_one_keeps_nothing() {
    let dataset = ScoreDataset::new("me").item("perfect", 1.0).item("half", 0.5);
    let (_, result) = search(&dataset, scored(1.5));
    let ids: Vec<&str> = result.positions.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["me"]);
}

#[test]
fn negative_threshold_keeps_zero_scores_midway() {
    let dataset = ScoreDataset::new("me").item("unrelated", 0.0);
    let (_, result) = search(&dataset, scored(-1.0));
    assert_eq!(result.len(), 2);

    // Relevance (0 - (-1)) / (1 - (-1)) = 0.5 puts the item halfway between the distance bounds.
    let opts = SimilarityOptions::default();
    let r = canvas().available_radius();
    let expected = (opts.min_distance * r + opts.max_distance * r) / 2.0;
    let d = result.position("unrelated").unwrap().distance(canvas().center());
    assert!((d - expected).abs() < 1e-9, "{d} vs {expected}");
}

#[test]
fn top_k_keeps_the_best_matches() {
    let opts = SimilarityOptions {
        max_results: Some(2),
        ..scored(0.3)
    };
    let (_, result) = search(&results(), opts);
    let ids: Vec<&str> = result.positions.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["me", "beach", "hike"]);
}

#[test]
fn nothing_above_threshold_leaves_the_subject_alone() {
    let (_, result) = search(&results(), scored(0.95));
    assert_eq!(result.len(), 1);
    assert_eq!(result.position("me"), Some(canvas().center()));
}

#[test]
fn ambient_scatter_places_everyone_without_edges() {
    let dataset = results();
    let (algorithm, result) = search(&dataset, SimilarityOptions::default());
    assert_eq!(result.len(), 6);

    let scene = Scene::build(
        &dataset.to_graph(),
        &result.positions,
        canvas().bounds,
        algorithm.weight_hints(),
    );
    assert!(scene.edges.is_empty());
    assert!(
        scene
            .nodes
            .iter()
            .filter(|n| !n.is_subject)
            .all(|n| n.visual_weight_hint == 0.5)
    );
}

#[test]
fn ambient_scatter_is_reproducible_per_seed() {
    let mut dataset = ScoreDataset::new("me");
    for i in 0..14 {
        dataset = dataset.item(format!("clip-{i}"), 0.5);
    }
    let seeded = |seed: u64| {
        search(
            &dataset,
            SimilarityOptions {
                random_seed: seed,
                ..SimilarityOptions::default()
            },
        )
        .1
    };
    assert_eq!(seeded(7), seeded(7));
    assert_ne!(seeded(7), seeded(8));

    let r = canvas().available_radius();
    let center = canvas().center();
    for p in seeded(7).positions.values().skip(1) {
        let d = p.distance(center) / r;
        assert!((0.28..=0.92).contains(&d), "ring radius {d}");
    }
}

fn ambient_radii(items: usize) -> Vec<f64> {
    let mut dataset = ScoreDataset::new("me");
    for i in 0..items {
        dataset = dataset.item(format!("clip-{i}"), 0.5);
    }
    let (_, result) = search(&dataset, SimilarityOptions::default());
    assert_eq!(result.len(), items + 1);

    let r = canvas().available_radius();
    let center = canvas().center();
    result
        .positions
        .values()
        .skip(1)
        .map(|p| p.distance(center) / r)
        .collect()
}

#[test]
fn small_ambient_sets_use_the_two_inner_rings() {
    let radii = ambient_radii(8);
    assert!(radii.iter().all(|&d| d < 0.75), "{radii:?}");
    assert!(radii.iter().any(|&d| (0.28..=0.42).contains(&d)));
    assert!(radii.iter().any(|&d| (0.53..=0.67).contains(&d)));
}

#[test]
fn larger_ambient_sets_fill_all_three_rings() {
    let radii = ambient_radii(9);
    for band in [0.28..=0.42, 0.53..=0.67, 0.78..=0.92] {
        assert!(radii.iter().any(|d| band.contains(d)), "{band:?} empty in {radii:?}");
    }
}
