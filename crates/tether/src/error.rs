#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("canvas must have finite, non-negative dimensions (got {width}x{height}, node half-size {node_half_size})")]
    InvalidCanvas {
        width: f64,
        height: f64,
        node_half_size: f64,
    },

    #[error("radial layouts need a subject node, but the graph has none")]
    MissingSubject,

    #[error("unknown node id: {id}")]
    UnknownNode { id: String },

    #[error("node {requested} cannot be dragged while {active} is being dragged")]
    DragInProgress { active: String, requested: String },

    #[error("invalid layout config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
