use crate::config::{LayoutConfig, ViewMode};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::geom::{CanvasBounds, Point};
use crate::graph::{Graph, LayoutResult};
use crate::interaction::{DragController, FrameScheduler, FrameTasks, NodeState};
use crate::scene::Scene;

/// The visualization component: owns the current dataset, view mode and canvas bounds, the
/// layout computed from them, and the drag controller reading home positions from that layout.
///
/// Any input change recomputes the layout synchronously and resets every node to Idle. A failed
/// recomputation (e.g. invalid bounds) leaves the previous state untouched.
#[derive(Debug)]
pub struct GraphView<S: FrameScheduler = FrameTasks> {
    dataset: Dataset,
    graph: Graph,
    mode: ViewMode,
    bounds: CanvasBounds,
    config: LayoutConfig,
    layout: LayoutResult,
    controller: DragController<S>,
}

impl<S: FrameScheduler> GraphView<S> {
    pub fn new(
        dataset: Dataset,
        mode: ViewMode,
        bounds: CanvasBounds,
        config: LayoutConfig,
        scheduler: S,
    ) -> Result<Self> {
        let graph = dataset.to_graph();
        let layout = compute(&graph, mode, bounds, &config)?;
        let controller = DragController::new(&layout, config.interaction.clone(), scheduler);
        Ok(Self {
            dataset,
            graph,
            mode,
            bounds,
            config,
            layout,
            controller,
        })
    }

    pub fn set_bounds(&mut self, bounds: CanvasBounds) -> Result<()> {
        let layout = compute(&self.graph, self.mode, bounds, &self.config)?;
        self.bounds = bounds;
        self.adopt(layout);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ViewMode) -> Result<()> {
        let layout = compute(&self.graph, mode, self.bounds, &self.config)?;
        self.mode = mode;
        self.adopt(layout);
        Ok(())
    }

    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<()> {
        let graph = dataset.to_graph();
        let layout = compute(&graph, self.mode, self.bounds, &self.config)?;
        self.dataset = dataset;
        self.graph = graph;
        self.adopt(layout);
        Ok(())
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        let layout = compute(&self.graph, self.mode, self.bounds, &config)?;
        self.controller.set_options(config.interaction.clone());
        self.config = config;
        self.adopt(layout);
        Ok(())
    }

    fn adopt(&mut self, layout: LayoutResult) {
        self.controller.reset(&layout);
        self.layout = layout;
    }

    pub fn on_pointer_down(&mut self, node_id: &str, pointer: Point, now_ms: f64) -> Result<()> {
        self.controller.pointer_down(node_id, pointer, now_ms)
    }

    pub fn on_pointer_move(&mut self, pointer: Point) -> Option<Point> {
        self.controller.pointer_move(pointer)
    }

    pub fn on_pointer_up(&mut self, now_ms: f64) -> Option<NodeState> {
        self.controller.pointer_up(now_ms)
    }

    /// Per-frame hook. Returns the scene to redraw while a return animation is running (including
    /// the frame on which the last one settles), `None` when there is nothing to animate.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<Scene> {
        if !self.controller.is_animating() {
            return None;
        }
        self.controller.advance(now_ms);
        Some(self.scene())
    }

    /// Current scene with live (possibly dragged or animating) positions.
    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.graph,
            self.controller.live_positions(),
            self.bounds,
            self.config.algorithm(self.mode).weight_hints(),
        )
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn controller(&self) -> &DragController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DragController<S> {
        &mut self.controller
    }
}

fn compute(
    graph: &Graph,
    mode: ViewMode,
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> Result<LayoutResult> {
    crate::layout(graph, config.canvas(bounds), &config.algorithm(mode))
}
