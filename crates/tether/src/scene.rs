//! Render-facing projection of a layout: what the host renderer draws each frame.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algo::Algorithm;
use crate::geom::{CanvasBounds, Point};
use crate::graph::Graph;

const AMBIENT_WEIGHT_HINT: f64 = 0.5;

/// How `visualWeightHint` is derived for non-subject nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightHints {
    /// Strongest incident edge weight.
    Incident,
    /// Weight of the tie to the subject (the relevance score in search views).
    SubjectTies,
    /// Constant hint and no edges: ambient scatter carries no ranking.
    Ambient,
}

impl Algorithm {
    pub fn weight_hints(&self) -> WeightHints {
        match self {
            Algorithm::Global(_) | Algorithm::Ego(_) => WeightHints::Incident,
            Algorithm::Similarity(opts) if opts.min_threshold.is_some() => WeightHints::SubjectTies,
            Algorithm::Similarity(_) => WeightHints::Ambient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub is_subject: bool,
    pub visual_weight_hint: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub from_id: String,
    pub to_id: String,
    pub stroke_weight_hint: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub bounds: CanvasBounds,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Nodes follow graph order but only those present in `positions`; edges need both endpoints
    /// present.
    pub fn build(
        graph: &Graph,
        positions: &IndexMap<String, Point>,
        bounds: CanvasBounds,
        hints: WeightHints,
    ) -> Self {
        let incident = match hints {
            WeightHints::Incident => graph.strongest_incident_weights(),
            WeightHints::SubjectTies => graph
                .subject_ties()
                .into_iter()
                .map(|w| w.unwrap_or(0.0))
                .collect(),
            WeightHints::Ambient => vec![AMBIENT_WEIGHT_HINT; graph.len()],
        };

        let nodes = graph
            .nodes()
            .iter()
            .zip(incident)
            .filter_map(|(node, hint)| {
                let p = positions.get(&node.id)?;
                Some(SceneNode {
                    id: node.id.clone(),
                    x: p.x,
                    y: p.y,
                    is_subject: node.is_subject,
                    visual_weight_hint: if node.is_subject { 1.0 } else { hint },
                })
            })
            .collect();

        let edges = if hints == WeightHints::Ambient {
            Vec::new()
        } else {
            graph
                .edges()
                .iter()
                .filter(|e| positions.contains_key(&e.from_id) && positions.contains_key(&e.to_id))
                .map(|e| SceneEdge {
                    from_id: e.from_id.clone(),
                    to_id: e.to_id.clone(),
                    stroke_weight_hint: e.weight,
                })
                .collect()
        };

        Self {
            bounds,
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
