//! Interaction counting from co-appearance logs.
//!
//! A log is a list of chunks (e.g. fixed-length video segments), each listing the people seen in
//! it. Every chunk counts one appearance per listed person and one interaction per unordered pair
//! seen together; repeated detections of the same person inside one chunk count once.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::dataset::{NodeInfo, RelationshipDataset, RelationshipItem, RelationshipLink};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoAppearanceLog {
    pub chunks: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoAppearanceCounts {
    /// Chunks each person appeared in, in first-seen order.
    pub appearances: IndexMap<String, u64>,
    /// Chunks each unordered pair shared, keyed in first-seen order of the pair.
    pub interactions: IndexMap<(String, String), u64>,
}

impl CoAppearanceCounts {
    pub fn interaction(&self, a: &str, b: &str) -> u64 {
        let forward = self.interactions.get(&(a.to_string(), b.to_string()));
        let backward = self.interactions.get(&(b.to_string(), a.to_string()));
        forward.or(backward).copied().unwrap_or(0)
    }
}

impl CoAppearanceLog {
    pub fn count(&self) -> CoAppearanceCounts {
        let mut counts = CoAppearanceCounts::default();
        for chunk in &self.chunks {
            let present: IndexSet<&str> = chunk
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .collect();

            for id in &present {
                *counts.appearances.entry((*id).to_string()).or_insert(0) += 1;
            }

            let present: Vec<&str> = present.into_iter().collect();
            for (i, a) in present.iter().enumerate() {
                for b in &present[i + 1..] {
                    let backward = ((*b).to_string(), (*a).to_string());
                    if let Some(n) = counts.interactions.get_mut(&backward) {
                        *n += 1;
                    } else {
                        *counts
                            .interactions
                            .entry(((*a).to_string(), (*b).to_string()))
                            .or_insert(0) += 1;
                    }
                }
            }
        }
        counts
    }
}

impl RelationshipDataset {
    /// Builds a relationship dataset around `subject_id`: pairs including the subject become
    /// `items`, every other pair becomes a `link`. Everyone seen in the log is declared as a node,
    /// so people who never shared a chunk with the subject still take part in the layout.
    pub fn from_co_appearances(subject_id: impl Into<String>, log: &CoAppearanceLog) -> Self {
        let subject_id = subject_id.into();
        let counts = log.count();

        let mut dataset = RelationshipDataset::new(subject_id.clone());
        dataset.nodes = counts
            .appearances
            .keys()
            .filter(|id| **id != subject_id)
            .map(|id| NodeInfo {
                id: id.clone(),
                label: None,
                image_ref: None,
            })
            .collect();

        for ((a, b), &n) in &counts.interactions {
            let raw_count = n as f64;
            if *a == subject_id {
                dataset.items.push(RelationshipItem {
                    other_id: b.clone(),
                    raw_count,
                });
            } else if *b == subject_id {
                dataset.items.push(RelationshipItem {
                    other_id: a.clone(),
                    raw_count,
                });
            } else {
                dataset.links.push(RelationshipLink {
                    from_id: a.clone(),
                    to_id: b.clone(),
                    raw_count,
                });
            }
        }

        tracing::debug!(
            people = counts.appearances.len(),
            items = dataset.items.len(),
            links = dataset.links.len(),
            "built relationship dataset from co-appearance log"
        );
        dataset
    }
}
