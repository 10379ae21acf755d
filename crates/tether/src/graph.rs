use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geom::{Canvas, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub is_subject: bool,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            image_ref: None,
            is_subject: false,
        }
    }

    pub fn subject(id: impl Into<String>) -> Self {
        Self {
            is_subject: true,
            ..Self::new(id)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub raw_count: f64,
    /// Tie strength in `[0, 1]`.
    pub weight: f64,
}

impl Edge {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, weight: f64) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            raw_count: 0.0,
            weight,
        }
    }

    pub fn with_raw_count(mut self, raw_count: f64) -> Self {
        self.raw_count = raw_count;
        self
    }
}

/// A sanitized, weighted, undirected relationship graph.
///
/// Construction never fails: duplicate node ids keep their first occurrence, only the first
/// subject keeps its flag, and edges that reference unknown nodes (or loop on one node) are
/// dropped. Upstream datasets are frequently partial, so these are data-quality issues rather
/// than errors.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    endpoints: Vec<(usize, usize)>,
    index_by_id: FxHashMap<String, usize>,
    subject_index: Option<usize>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut kept_nodes: Vec<Node> = Vec::with_capacity(nodes.len());
        let mut index_by_id: FxHashMap<String, usize> = FxHashMap::default();
        let mut subject_index = None;
        let mut duplicate_nodes = 0usize;

        for mut node in nodes {
            if index_by_id.contains_key(&node.id) {
                duplicate_nodes += 1;
                continue;
            }
            if node.is_subject {
                if subject_index.is_some() {
                    node.is_subject = false;
                } else {
                    subject_index = Some(kept_nodes.len());
                }
            }
            index_by_id.insert(node.id.clone(), kept_nodes.len());
            kept_nodes.push(node);
        }

        let mut kept_edges = Vec::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());
        let mut dropped_edges = 0usize;
        for mut edge in edges {
            let (Some(&a), Some(&b)) = (
                index_by_id.get(&edge.from_id),
                index_by_id.get(&edge.to_id),
            ) else {
                dropped_edges += 1;
                continue;
            };
            if a == b {
                dropped_edges += 1;
                continue;
            }
            edge.weight = if edge.weight.is_finite() {
                edge.weight.clamp(0.0, 1.0)
            } else {
                0.0
            };
            kept_edges.push(edge);
            endpoints.push((a, b));
        }

        if duplicate_nodes > 0 || dropped_edges > 0 {
            tracing::debug!(
                duplicate_nodes,
                dropped_edges,
                "sanitized relationship graph"
            );
        }

        Self {
            nodes: kept_nodes,
            edges: kept_edges,
            endpoints,
            index_by_id,
            subject_index,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node indices of every kept edge, parallel to [`Graph::edges`].
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn subject_index(&self) -> Option<usize> {
        self.subject_index
    }

    pub fn subject(&self) -> Option<&Node> {
        self.subject_index.map(|i| &self.nodes[i])
    }

    /// Strongest weight per unordered node pair, keyed `(min, max)`.
    pub fn pair_weights(&self) -> FxHashMap<(usize, usize), f64> {
        let mut out: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        for (edge, &(a, b)) in self.edges.iter().zip(&self.endpoints) {
            let key = (a.min(b), a.max(b));
            let slot = out.entry(key).or_insert(edge.weight);
            *slot = slot.max(edge.weight);
        }
        out
    }

    /// Strongest incident edge weight for every node (0 for isolated nodes).
    pub fn strongest_incident_weights(&self) -> Vec<f64> {
        let mut out = vec![0.0_f64; self.nodes.len()];
        for (edge, &(a, b)) in self.edges.iter().zip(&self.endpoints) {
            out[a] = out[a].max(edge.weight);
            out[b] = out[b].max(edge.weight);
        }
        out
    }

    /// Weight of each node's strongest edge to the subject, `None` when it has no direct tie.
    pub fn subject_ties(&self) -> Vec<Option<f64>> {
        let mut out = vec![None; self.nodes.len()];
        let Some(subject) = self.subject_index else {
            return out;
        };
        for (edge, &(a, b)) in self.edges.iter().zip(&self.endpoints) {
            let other = if a == subject {
                b
            } else if b == subject {
                a
            } else {
                continue;
            };
            let slot: &mut Option<f64> = &mut out[other];
            *slot = Some(slot.map_or(edge.weight, |w| w.max(edge.weight)));
        }
        out
    }
}

/// Immutable output of one layout run: node positions in node order plus the canvas they were
/// computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub positions: IndexMap<String, Point>,
    pub canvas: Canvas,
}

impl LayoutResult {
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            positions: IndexMap::new(),
            canvas,
        }
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
