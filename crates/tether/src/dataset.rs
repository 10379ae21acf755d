//! Host-facing input datasets and their conversion into a weighted [`Graph`].

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, Node};
use crate::weight::{count_denominator, count_weight, sanitize_magnitude, score_weight};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl NodeInfo {
    fn to_node(&self, is_subject: bool) -> Node {
        Node {
            id: self.id.clone(),
            label: self.label.clone().unwrap_or_else(|| self.id.clone()),
            image_ref: self.image_ref.clone(),
            is_subject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipItem {
    pub other_id: String,
    pub raw_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipLink {
    pub from_id: String,
    pub to_id: String,
    pub raw_count: f64,
}

/// Who interacted with whom, and how often.
///
/// `items` are the subject's own ties; `links` are ties between other people and feed the
/// second-degree placement and the global view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDataset {
    pub subject_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeInfo>,
    pub items: Vec<RelationshipItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RelationshipLink>,
}

impl RelationshipDataset {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            nodes: Vec::new(),
            items: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn item(mut self, other_id: impl Into<String>, raw_count: f64) -> Self {
        self.items.push(RelationshipItem {
            other_id: other_id.into(),
            raw_count,
        });
        self
    }

    pub fn link(mut self, from_id: impl Into<String>, to_id: impl Into<String>, raw_count: f64) -> Self {
        self.links.push(RelationshipLink {
            from_id: from_id.into(),
            to_id: to_id.into(),
            raw_count,
        });
        self
    }

    /// No items, links or declared nodes: nothing to show besides the subject.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.links.is_empty() && self.nodes.is_empty()
    }

    /// Node order: the subject, declared `nodes`, then item targets. Links never introduce nodes,
    /// so a link naming an unknown id is dropped with the rest of the dangling edges. An empty
    /// dataset yields an empty graph, not a lone subject.
    pub fn to_graph(&self) -> Graph {
        if self.is_empty() {
            return Graph::default();
        }

        let subject = self
            .nodes
            .iter()
            .find(|n| n.id == self.subject_id)
            .map(|n| n.to_node(true))
            .unwrap_or_else(|| Node::subject(self.subject_id.clone()));

        let mut nodes = Vec::with_capacity(1 + self.nodes.len() + self.items.len());
        nodes.push(subject);
        nodes.extend(self.nodes.iter().map(|n| n.to_node(false)));
        nodes.extend(self.items.iter().map(|i| Node::new(i.other_id.clone())));

        let denominator = count_denominator(
            self.items
                .iter()
                .map(|i| i.raw_count)
                .chain(self.links.iter().map(|l| l.raw_count)),
        );

        let mut edges = Vec::with_capacity(self.items.len() + self.links.len());
        for item in &self.items {
            edges.push(
                Edge::new(
                    self.subject_id.clone(),
                    item.other_id.clone(),
                    count_weight(item.raw_count, denominator),
                )
                .with_raw_count(sanitize_magnitude(item.raw_count)),
            );
        }
        for link in &self.links {
            edges.push(
                Edge::new(
                    link.from_id.clone(),
                    link.to_id.clone(),
                    count_weight(link.raw_count, denominator),
                )
                .with_raw_count(sanitize_magnitude(link.raw_count)),
            );
        }

        Graph::new(nodes, edges)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreItem {
    pub item_id: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// Which memory items matched a query, and how well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDataset {
    pub subject_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub items: Vec<ScoreItem>,
}

impl ScoreDataset {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            query: None,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item_id: impl Into<String>, score: f64) -> Self {
        self.items.push(ScoreItem {
            item_id: item_id.into(),
            score,
            label: None,
            image_ref: None,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subject first, then items in input order. An empty result list yields an empty graph.
    pub fn to_graph(&self) -> Graph {
        if self.is_empty() {
            return Graph::default();
        }

        let mut nodes = Vec::with_capacity(1 + self.items.len());
        nodes.push(Node::subject(self.subject_id.clone()));
        for item in &self.items {
            nodes.push(Node {
                id: item.item_id.clone(),
                label: item.label.clone().unwrap_or_else(|| item.item_id.clone()),
                image_ref: item.image_ref.clone(),
                is_subject: false,
            });
        }

        let edges = self
            .items
            .iter()
            .map(|item| {
                Edge::new(
                    self.subject_id.clone(),
                    item.item_id.clone(),
                    score_weight(item.score),
                )
                .with_raw_count(sanitize_magnitude(item.score))
            })
            .collect();

        Graph::new(nodes, edges)
    }
}

/// Either dataset shape; JSON input is told apart by its item fields (`otherId` vs `itemId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Relationships(RelationshipDataset),
    Scores(ScoreDataset),
}

impl Dataset {
    pub fn subject_id(&self) -> &str {
        match self {
            Dataset::Relationships(d) => &d.subject_id,
            Dataset::Scores(d) => &d.subject_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Dataset::Relationships(d) => d.is_empty(),
            Dataset::Scores(d) => d.is_empty(),
        }
    }

    pub fn to_graph(&self) -> Graph {
        match self {
            Dataset::Relationships(d) => d.to_graph(),
            Dataset::Scores(d) => d.to_graph(),
        }
    }
}

impl From<RelationshipDataset> for Dataset {
    fn from(value: RelationshipDataset) -> Self {
        Self::Relationships(value)
    }
}

impl From<ScoreDataset> for Dataset {
    fn from(value: ScoreDataset) -> Self {
        Self::Scores(value)
    }
}
