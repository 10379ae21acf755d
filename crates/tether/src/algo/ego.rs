//! Ego-centric radial layout.
//!
//! Pass 1 puts every direct tie of the subject on a golden-angle spiral, closer for stronger
//! ties. Pass 2 hangs each remaining node off its strongest pass-1 neighbor ("anchor"), in up to
//! `cluster_slots` angular slots pointing away from the subject. Nodes with no pass-1 neighbor go
//! to a far fallback ring. Everything is a pure function of node order, so identical input gives
//! bit-identical output.

use crate::algo::{EgoOptions, collect_result, radial_distance};
use crate::error::{Error, Result};
use crate::geom::{Canvas, Point};
use crate::graph::{Graph, LayoutResult};

pub fn layout(graph: &Graph, canvas: &Canvas, opts: &EgoOptions) -> Result<LayoutResult> {
    let subject = graph.subject_index().ok_or(Error::MissingSubject)?;
    let positions = place(graph, canvas, opts, subject);
    Ok(collect_result(
        graph,
        canvas,
        positions.into_iter().map(Some).collect(),
    ))
}

#[derive(Debug, Clone, Copy)]
struct Radii {
    min: f64,
    max: f64,
    cluster_min: f64,
    cluster_max: f64,
    fallback: f64,
}

impl Radii {
    fn new(canvas: &Canvas, opts: &EgoOptions) -> Self {
        let r = canvas.available_radius();
        let frac = |v: f64| if v.is_finite() { v.max(0.0) * r } else { 0.0 };

        let max = frac(opts.max_distance);
        // Keep at least one node diameter between the subject and its closest tie when the
        // canvas allows it.
        let min = frac(opts.min_distance)
            .max(canvas.node_half_size * 2.0)
            .min(max);
        let cluster_min = frac(opts.cluster_min_distance);
        let cluster_max = frac(opts.cluster_max_distance).max(cluster_min);
        let fallback = frac(opts.fallback_distance).max(max);
        Self {
            min,
            max,
            cluster_min,
            cluster_max,
            fallback,
        }
    }
}

fn place(graph: &Graph, canvas: &Canvas, opts: &EgoOptions, subject: usize) -> Vec<Point> {
    let n = graph.len();
    let center = canvas.center();
    let radii = Radii::new(canvas, opts);
    let golden = opts.golden_angle_degrees.to_radians();
    let jitter = opts.jitter_degrees.to_radians();

    let mut positions: Vec<Option<Point>> = vec![None; n];
    positions[subject] = Some(center);

    // Pass 1: direct ties.
    let ties = graph.subject_ties();
    let mut first_degree = vec![false; n];
    let mut direct_count = 0usize;
    for (index, tie) in ties.iter().enumerate() {
        let Some(weight) = *tie else {
            continue;
        };
        let angle = golden * direct_count as f64 + index_jitter(direct_count, jitter);
        let distance = radial_distance(weight, radii.min, radii.max);
        positions[index] = Some(center + Point::from_angle(angle) * distance);
        first_degree[index] = true;
        direct_count += 1;
    }

    // Pass 2: strongest pass-1 neighbor per remaining node. Ties between equally strong anchors
    // keep the first edge in input order.
    let mut anchors: Vec<Option<(usize, f64)>> = vec![None; n];
    for (edge, &(a, b)) in graph.edges().iter().zip(graph.endpoints()) {
        for (node, other) in [(a, b), (b, a)] {
            if node == subject || first_degree[node] || !first_degree[other] {
                continue;
            }
            let stronger = anchors[node].is_none_or(|(_, w)| edge.weight > w);
            if stronger {
                anchors[node] = Some((other, edge.weight));
            }
        }
    }

    let slots = opts.cluster_slots.max(1);
    let step = opts.cluster_step_degrees.to_radians();
    let mut children_per_anchor = vec![0usize; n];
    let mut fallback_count = 0usize;
    let mut second_degree = 0usize;
    for index in 0..n {
        if positions[index].is_some() {
            continue;
        }
        match anchors[index] {
            Some((anchor, weight)) => {
                let Some(anchor_pos) = positions[anchor] else {
                    continue;
                };
                let k = children_per_anchor[anchor];
                children_per_anchor[anchor] += 1;

                let ring = (k / slots) as f64;
                let offset = centered_slot(k % slots) * step + ring * step / 2.0;
                let outward = (anchor_pos - center).angle();
                let distance = radial_distance(weight, radii.cluster_min, radii.cluster_max);
                positions[index] =
                    Some(anchor_pos + Point::from_angle(outward + offset) * distance);
                second_degree += 1;
            }
            None => {
                // Half a golden step keeps the fallback spokes off the pass-1 spokes.
                let angle = golden * (fallback_count as f64 + 0.5);
                positions[index] = Some(center + Point::from_angle(angle) * radii.fallback);
                fallback_count += 1;
            }
        }
    }

    tracing::debug!(
        direct = direct_count,
        second_degree,
        unconnected = fallback_count,
        "ego layout placed nodes"
    );

    positions
        .into_iter()
        .map(|p| p.unwrap_or(center))
        .collect()
}

/// Small deterministic angular offset for the `k`-th direct tie, in `[-amplitude/2, amplitude/2)`.
fn index_jitter(k: usize, amplitude: f64) -> f64 {
    ((k as f64 * 0.618_034).fract() - 0.5) * amplitude
}

/// Slot order fanning out from straight-outward: 0, +1, -1, +2, -2, ...
fn centered_slot(slot: usize) -> f64 {
    if slot == 0 {
        0.0
    } else if slot % 2 == 1 {
        slot.div_ceil(2) as f64
    } else {
        -((slot / 2) as f64)
    }
}
