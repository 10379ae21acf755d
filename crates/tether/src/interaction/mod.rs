//! Pointer interaction: drag a node, release it, watch it spring back home.

pub mod controller;
pub mod easing;
pub mod frames;

pub use controller::{DragController, DragSession, InteractionOptions, NodeState, ReturnAnimation};
pub use easing::elastic_out;
pub use frames::{FrameHandle, FrameScheduler, FrameTasks, NoFrames};
