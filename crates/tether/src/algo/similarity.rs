use std::f64::consts::TAU;

use crate::algo::{SimilarityOptions, collect_result, radial_distance};
use crate::error::{Error, Result};
use crate::geom::{Canvas, Point};
use crate::graph::{Graph, LayoutResult};
use crate::rng::XorShift64Star;

pub fn layout(graph: &Graph, canvas: &Canvas, opts: &SimilarityOptions) -> Result<LayoutResult> {
    let subject = graph.subject_index().ok_or(Error::MissingSubject)?;
    let center = canvas.center();

    let mut positions: Vec<Option<Point>> = vec![None; graph.len()];
    positions[subject] = Some(center);

    let scores = graph.subject_ties();
    match opts.min_threshold {
        Some(threshold) => place_scored(&scores, subject, canvas, opts, threshold, &mut positions),
        None => {
            let mut rng = XorShift64Star::new(opts.random_seed);
            place_ambient(subject, canvas, opts, &mut rng, &mut positions)
        }
    }

    Ok(collect_result(graph, canvas, positions))
}

/// Items that pass the threshold (and the optional top-k cut), in input order.
pub fn surviving_items(
    scores: &[Option<f64>],
    subject: usize,
    threshold: f64,
    max_results: Option<usize>,
) -> Vec<(usize, f64)> {
    let mut survivors: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != subject)
        .filter_map(|(index, score)| score.map(|s| (index, s)))
        .filter(|&(_, s)| s >= threshold)
        .collect();

    if let Some(k) = max_results {
        if survivors.len() > k {
            // Stable sort: equal scores keep input order.
            survivors.sort_by(|a, b| b.1.total_cmp(&a.1));
            survivors.truncate(k);
            survivors.sort_by_key(|&(index, _)| index);
        }
    }
    survivors
}

fn place_scored(
    scores: &[Option<f64>],
    subject: usize,
    canvas: &Canvas,
    opts: &SimilarityOptions,
    threshold: f64,
    positions: &mut [Option<Point>],
) {
    // Out-of-range thresholds filter as given; only the relevance term needs guarding.
    let threshold = if threshold.is_finite() { threshold } else { 0.0 };
    let survivors = surviving_items(scores, subject, threshold, opts.max_results);
    if survivors.is_empty() {
        return;
    }

    let r = canvas.available_radius();
    let max_d = opts.max_distance.max(0.0) * r;
    let min_d = (opts.min_distance.max(0.0) * r)
        .max(canvas.node_half_size * 2.0)
        .min(max_d);
    let center = canvas.center();
    let count = survivors.len() as f64;

    for (slot, &(index, score)) in survivors.iter().enumerate() {
        let relevance = if threshold >= 1.0 {
            1.0
        } else {
            ((score - threshold) / (1.0 - threshold)).clamp(0.0, 1.0)
        };
        let angle = TAU * slot as f64 / count;
        let distance = radial_distance(relevance, min_d, max_d);
        positions[index] = Some(center + Point::from_angle(angle) * distance);
    }
}

/// Idle scatter: two rings for small sets, three otherwise, with seeded radius/angle jitter.
/// Purely decorative; ring membership carries no ranking.
fn place_ambient(
    subject: usize,
    canvas: &Canvas,
    opts: &SimilarityOptions,
    rng: &mut XorShift64Star,
    positions: &mut [Option<Point>],
) {
    let items: Vec<usize> = (0..positions.len()).filter(|&i| i != subject).collect();
    if items.is_empty() {
        return;
    }

    let default_rings = [0.5];
    let rings: &[f64] = if opts.ambient_rings.is_empty() {
        &default_rings
    } else {
        &opts.ambient_rings
    };
    let wanted = if items.len() <= 8 { 2 } else { 3 };
    let ring_count = wanted.min(rings.len());

    let mut ring_sizes = vec![0usize; ring_count];
    for k in 0..items.len() {
        ring_sizes[k % ring_count] += 1;
    }

    let r = canvas.available_radius();
    let center = canvas.center();
    for (k, &index) in items.iter().enumerate() {
        let ring = k % ring_count;
        let slot = k / ring_count;
        let slot_width = TAU / ring_sizes[ring] as f64;
        // Stagger rings by half a slot so spokes do not line up.
        let base = slot_width * (slot as f64 + 0.5 * ring as f64);
        let angle = base + rng.next_f64_signed() * opts.ambient_angle_jitter * slot_width / 2.0;
        let radius = (rings[ring] + rng.next_f64_signed() * opts.ambient_radius_jitter).max(0.0) * r;
        positions[index] = Some(center + Point::from_angle(angle) * radius);
    }
}
