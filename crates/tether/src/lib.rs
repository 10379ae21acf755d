#![forbid(unsafe_code)]

//! Headless layout engine for weighted relationship graphs.
//!
//! `tether` turns a subject, the people (or items) it relates to, and how strongly, into canvas
//! positions: a stress projection of the whole graph, an ego-centric radial view, or a
//! similarity ring around a search subject. A drag controller adds pointer offsets on top of a
//! layout and springs nodes back home with an elastic animation. Rendering is left to the host;
//! [`Scene`] is everything it needs to draw a frame.

pub mod algo;
pub mod config;
pub mod cooccurrence;
pub mod dataset;
pub mod error;
pub mod geom;
pub mod graph;
pub mod interaction;
pub mod rng;
pub mod scene;
pub mod view;
pub mod weight;

pub use algo::{Algorithm, EgoOptions, GlobalOptions, SimilarityOptions};
pub use config::{LayoutConfig, ViewMode};
pub use cooccurrence::{CoAppearanceCounts, CoAppearanceLog};
pub use dataset::{
    Dataset, NodeInfo, RelationshipDataset, RelationshipItem, RelationshipLink, ScoreDataset,
    ScoreItem,
};
pub use error::{Error, Result};
pub use geom::{Canvas, CanvasBounds, Point};
pub use graph::{Edge, Graph, LayoutResult, Node};
pub use interaction::{
    DragController, DragSession, FrameHandle, FrameScheduler, FrameTasks, InteractionOptions,
    NoFrames, NodeState, ReturnAnimation, elastic_out,
};
pub use rng::XorShift64Star;
pub use scene::{Scene, SceneEdge, SceneNode, WeightHints};
pub use view::GraphView;

/// Headless layout entry point.
///
/// An empty graph yields an empty result for every strategy. Data-quality problems (dangling
/// edges, odd weights) are absorbed by [`Graph::new`]; only an unusable canvas or a radial
/// layout without a subject fail.
pub fn layout(graph: &Graph, canvas: Canvas, algorithm: &Algorithm) -> Result<LayoutResult> {
    canvas.validate()?;
    if graph.is_empty() {
        return Ok(LayoutResult::empty(canvas));
    }

    let started = std::time::Instant::now();
    let result = match algorithm {
        Algorithm::Global(opts) => algo::global::layout(graph, &canvas, opts),
        Algorithm::Ego(opts) => algo::ego::layout(graph, &canvas, opts),
        Algorithm::Similarity(opts) => algo::similarity::layout(graph, &canvas, opts),
    }?;

    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edges().len(),
        placed = result.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "layout computed"
    );
    Ok(result)
}
