pub mod ego;
pub mod global;
pub mod similarity;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geom::{Canvas, Point};
use crate::graph::{Graph, LayoutResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// Stress-minimizing projection of the whole weighted graph, no designated center.
    Global(GlobalOptions),
    /// Subject at the center, direct ties on a golden-angle spiral, second-degree ties clustered
    /// around their strongest direct anchor.
    Ego(EgoOptions),
    /// Scored items around the subject, closer when more relevant.
    Similarity(SimilarityOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalOptions {
    /// Seed for the initial scatter. The projection is deterministic for a fixed seed.
    pub random_seed: u64,
    pub iterations: usize,
    pub learning_rate: f64,
    /// Target distance for a weight-0 tie, in pixels. Defaults to `0.6 * min(width, height)`.
    pub scale_factor: Option<f64>,
    /// Multiplier on `scale_factor` for pairs with no tie at all.
    pub unconnected_factor: f64,
    /// Floor for every target distance, in pixels. Defaults to one node diameter.
    pub min_separation: Option<f64>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            iterations: 200,
            learning_rate: 0.01,
            scale_factor: None,
            unconnected_factor: 1.25,
            min_separation: None,
        }
    }
}

/// Radii are fractions of [`Canvas::available_radius`], so every ring fits on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EgoOptions {
    pub min_distance: f64,
    pub max_distance: f64,
    pub cluster_min_distance: f64,
    pub cluster_max_distance: f64,
    pub fallback_distance: f64,
    pub golden_angle_degrees: f64,
    pub cluster_step_degrees: f64,
    pub cluster_slots: usize,
    pub jitter_degrees: f64,
}

impl Default for EgoOptions {
    fn default() -> Self {
        Self {
            min_distance: 0.22,
            max_distance: 0.62,
            cluster_min_distance: 0.10,
            cluster_max_distance: 0.28,
            fallback_distance: 0.95,
            golden_angle_degrees: 137.5,
            cluster_step_degrees: 72.0,
            cluster_slots: 5,
            jitter_degrees: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimilarityOptions {
    /// `Some` ranks items by score and drops those below it; `None` selects the ambient scatter.
    pub min_threshold: Option<f64>,
    /// Keep only the best `k` surviving items.
    pub max_results: Option<usize>,
    pub min_distance: f64,
    pub max_distance: f64,
    pub ambient_rings: Vec<f64>,
    pub ambient_radius_jitter: f64,
    /// Fraction of one slot's angular width.
    pub ambient_angle_jitter: f64,
    pub random_seed: u64,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            min_threshold: None,
            max_results: None,
            min_distance: 0.2,
            max_distance: 0.9,
            ambient_rings: vec![0.35, 0.6, 0.85],
            ambient_radius_jitter: 0.06,
            ambient_angle_jitter: 0.3,
            random_seed: 0,
        }
    }
}

/// Clamps every placed node and collects positions in graph node order; `None` entries (nodes a
/// strategy chose not to place) are left out.
pub(crate) fn collect_result(
    graph: &Graph,
    canvas: &Canvas,
    positions: Vec<Option<Point>>,
) -> LayoutResult {
    let mut out: IndexMap<String, Point> = IndexMap::with_capacity(graph.len());
    for (node, pos) in graph.nodes().iter().zip(positions) {
        if let Some(p) = pos {
            out.insert(node.id.clone(), canvas.clamp(p));
        }
    }
    LayoutResult {
        positions: out,
        canvas: *canvas,
    }
}

/// Radial distance for a tie of strength `weight`: `max_d` at weight 0, `min_d` at weight 1.
pub(crate) fn radial_distance(weight: f64, min_d: f64, max_d: f64) -> f64 {
    (max_d - weight * (max_d - min_d)).max(min_d)
}
