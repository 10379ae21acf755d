use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{Canvas, Point};
use crate::graph::LayoutResult;
use crate::interaction::easing::elastic_out;
use crate::interaction::frames::{FrameHandle, FrameScheduler, FrameTasks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeState {
    Idle,
    Dragging,
    Releasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionOptions {
    /// Length of the return-home animation. Non-positive values snap home immediately.
    pub duration_ms: f64,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self { duration_ms: 600.0 }
    }
}

/// Exists only while a pointer is held down on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub node_id: String,
    pub pointer_offset: Point,
    pub started_from_home: Point,
}

/// Exists only between pointer release and the node settling back home.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnAnimation {
    pub node_id: String,
    pub from_position: Point,
    pub to_position: Point,
    pub start_ms: f64,
    pub duration_ms: f64,
    handle: FrameHandle,
}

impl ReturnAnimation {
    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    /// Interpolated position at `now_ms`, and whether the animation has run its full duration.
    pub fn sample(&self, now_ms: f64) -> (Point, bool) {
        let elapsed = now_ms - self.start_ms;
        if elapsed >= self.duration_ms {
            return (self.to_position, true);
        }
        let t = (elapsed / self.duration_ms).max(0.0);
        (self.from_position.lerp(self.to_position, elastic_out(t)), false)
    }
}

/// Pointer-driven offsets on top of the active layout, with an elastic return to each node's
/// home position on release.
///
/// Per node the states run Idle -> Dragging -> Releasing -> Idle; at most one node is dragged at
/// a time, and a node never has a drag and a return animation at once. Home positions come only
/// from the latest [`LayoutResult`]; live positions are always clamped to the canvas.
#[derive(Debug)]
pub struct DragController<S: FrameScheduler = FrameTasks> {
    canvas: Canvas,
    home: IndexMap<String, Point>,
    live: IndexMap<String, Point>,
    drag: Option<DragSession>,
    animations: IndexMap<String, ReturnAnimation>,
    scheduler: S,
    options: InteractionOptions,
}

impl<S: FrameScheduler> DragController<S> {
    pub fn new(layout: &LayoutResult, options: InteractionOptions, scheduler: S) -> Self {
        let mut controller = Self {
            canvas: layout.canvas,
            home: IndexMap::new(),
            live: IndexMap::new(),
            drag: None,
            animations: IndexMap::new(),
            scheduler,
            options,
        };
        controller.reset(layout);
        controller
    }

    /// Adopts a freshly computed layout: every drag and animation is dropped (their frame tasks
    /// cancelled) and all nodes go Idle at their new home positions.
    pub fn reset(&mut self, layout: &LayoutResult) {
        for (_, animation) in self.animations.drain(..) {
            self.scheduler.cancel(animation.handle);
        }
        if let Some(drag) = self.drag.take() {
            tracing::debug!(node = %drag.node_id, "drag invalidated by layout change");
        }

        self.canvas = layout.canvas;
        self.home = layout
            .positions
            .iter()
            .map(|(id, p)| (id.clone(), layout.canvas.clamp(*p)))
            .collect();
        self.live = self.home.clone();
    }

    /// Starts dragging `node_id`. A non-finite pointer position is ignored, like in
    /// [`pointer_move`](Self::pointer_move).
    pub fn pointer_down(&mut self, node_id: &str, pointer: Point, now_ms: f64) -> Result<()> {
        if !self.home.contains_key(node_id) {
            return Err(Error::UnknownNode {
                id: node_id.to_string(),
            });
        }
        if let Some(active) = &self.drag {
            if active.node_id != node_id {
                return Err(Error::DragInProgress {
                    active: active.node_id.clone(),
                    requested: node_id.to_string(),
                });
            }
        }
        if !pointer.is_finite() {
            tracing::debug!(node = node_id, "ignoring pointer down at a non-finite position");
            return Ok(());
        }

        // Grabbing a node mid-return continues from wherever the animation has it right now.
        if let Some(animation) = self.animations.shift_remove(node_id) {
            self.scheduler.cancel(animation.handle);
            let (at, _) = animation.sample(now_ms);
            self.live.insert(node_id.to_string(), self.canvas.clamp(at));
            tracing::debug!(node = node_id, "return animation cancelled by new drag");
        }

        let live = self.live.get(node_id).copied().unwrap_or_default();
        let home = self.home.get(node_id).copied().unwrap_or_default();
        self.drag = Some(DragSession {
            node_id: node_id.to_string(),
            pointer_offset: pointer - live,
            started_from_home: home,
        });
        Ok(())
    }

    /// Moves the dragged node under the pointer. Returns its new live position, or `None` when
    /// nothing is being dragged (or the pointer position is not finite).
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let drag = self.drag.as_ref()?;
        if !pointer.is_finite() {
            return None;
        }
        let next = self.canvas.clamp(pointer - drag.pointer_offset);
        self.live.insert(drag.node_id.clone(), next);
        Some(next)
    }

    /// Ends the active drag and starts the node's return animation. Returns the released node's
    /// new state: `Releasing`, or `Idle` when it snapped home because no frames could be
    /// scheduled. `None` when nothing was being dragged.
    pub fn pointer_up(&mut self, now_ms: f64) -> Option<NodeState> {
        let drag = self.drag.take()?;
        let node_id = drag.node_id;
        let from = self.live.get(&node_id).copied().unwrap_or_default();
        let to = self.home.get(&node_id).copied().unwrap_or(drag.started_from_home);

        let duration_ms = self.options.duration_ms;
        if !(duration_ms.is_finite() && duration_ms > 0.0) {
            self.live.insert(node_id, to);
            return Some(NodeState::Idle);
        }

        let Some(handle) = self.scheduler.request(&node_id) else {
            tracing::warn!(node = %node_id, "frame scheduling unavailable; snapping home");
            self.live.insert(node_id, to);
            return Some(NodeState::Idle);
        };

        tracing::debug!(node = %node_id, duration_ms, "return animation started");
        self.animations.insert(
            node_id.clone(),
            ReturnAnimation {
                node_id,
                from_position: from,
                to_position: to,
                start_ms: now_ms,
                duration_ms,
                handle,
            },
        );
        Some(NodeState::Releasing)
    }

    /// Steps every return animation to `now_ms`. Finished animations land exactly on home, release
    /// their frame task and go Idle. Returns `true` while any animation is still running.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let mut finished = Vec::new();
        for (node_id, animation) in &self.animations {
            let (at, done) = animation.sample(now_ms);
            self.live.insert(node_id.clone(), self.canvas.clamp(at));
            if done {
                finished.push(node_id.clone());
            }
        }
        for node_id in finished {
            if let Some(animation) = self.animations.shift_remove(&node_id) {
                self.scheduler.cancel(animation.handle);
                self.live.insert(node_id.clone(), animation.to_position);
                tracing::debug!(node = %node_id, "return animation finished");
            }
        }
        !self.animations.is_empty()
    }

    pub fn state(&self, node_id: &str) -> NodeState {
        if self
            .drag
            .as_ref()
            .is_some_and(|d| d.node_id == node_id)
        {
            NodeState::Dragging
        } else if self.animations.contains_key(node_id) {
            NodeState::Releasing
        } else {
            NodeState::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn animation(&self, node_id: &str) -> Option<&ReturnAnimation> {
        self.animations.get(node_id)
    }

    pub fn live_position(&self, node_id: &str) -> Option<Point> {
        self.live.get(node_id).copied()
    }

    pub fn home_position(&self, node_id: &str) -> Option<Point> {
        self.home.get(node_id).copied()
    }

    pub fn live_positions(&self) -> &IndexMap<String, Point> {
        &self.live
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn options(&self) -> &InteractionOptions {
        &self.options
    }

    /// Applies to releases from now on; running animations keep their duration.
    pub fn set_options(&mut self, options: InteractionOptions) {
        self.options = options;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
