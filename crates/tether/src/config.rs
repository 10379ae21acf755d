use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algo::{Algorithm, EgoOptions, GlobalOptions, SimilarityOptions};
use crate::error::Result;
use crate::geom::{Canvas, CanvasBounds};
use crate::interaction::InteractionOptions;

/// Which placement strategy a view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Global,
    #[default]
    Ego,
    Similarity,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Global => "global",
            ViewMode::Ego => "ego",
            ViewMode::Similarity => "similarity",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" | "full" => Ok(Self::Global),
            "ego" | "radial" => Ok(Self::Ego),
            "similarity" | "search" => Ok(Self::Similarity),
            _ => Err(()),
        }
    }
}

/// All tuning knobs of the layout engine. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_half_size: f64,
    pub interaction: InteractionOptions,
    pub global: GlobalOptions,
    pub ego: EgoOptions,
    pub similarity: SimilarityOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_half_size: 24.0,
            interaction: InteractionOptions::default(),
            global: GlobalOptions::default(),
            ego: EgoOptions::default(),
            similarity: SimilarityOptions::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn algorithm(&self, mode: ViewMode) -> Algorithm {
        match mode {
            ViewMode::Global => Algorithm::Global(self.global.clone()),
            ViewMode::Ego => Algorithm::Ego(self.ego.clone()),
            ViewMode::Similarity => Algorithm::Similarity(self.similarity.clone()),
        }
    }

    pub fn canvas(&self, bounds: CanvasBounds) -> Canvas {
        Canvas::new(bounds, self.node_half_size)
    }

    /// Seeds every randomized strategy at once.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.global.random_seed = seed;
        self.similarity.random_seed = seed;
        self
    }
}
