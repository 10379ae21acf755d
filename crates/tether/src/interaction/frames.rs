//! Per-node frame tasks.
//!
//! The controller asks for a frame task whenever a node starts animating and cancels it when the
//! animation finishes or is superseded. Hosts either drive a real frame loop off the pending
//! tasks ([`FrameTasks`]) or report that they cannot schedule frames at all ([`NoFrames`]), in
//! which case releases snap straight home.

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    /// Registers a repeating frame task for `node_id`; `None` when frames are unavailable.
    fn request(&mut self, node_id: &str) -> Option<FrameHandle>;

    /// Cancels a task. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Table of pending frame tasks, keyed by handle, that a host polls each frame.
#[derive(Debug, Clone, Default)]
pub struct FrameTasks {
    next_id: u64,
    pending: IndexMap<FrameHandle, String>,
}

impl FrameTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Node ids with a live task, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.values().map(String::as_str)
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle)
    }
}

impl FrameScheduler for FrameTasks {
    fn request(&mut self, node_id: &str) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.insert(handle, node_id.to_string());
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.shift_remove(&handle);
    }
}

/// A host without frame callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrames;

impl FrameScheduler for NoFrames {
    fn request(&mut self, _node_id: &str) -> Option<FrameHandle> {
        None
    }

    fn cancel(&mut self, _handle: FrameHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_are_tracked_until_cancelled() {
        let mut tasks = FrameTasks::new();
        let a = tasks.request("a").unwrap();
        let b = tasks.request("b").unwrap();
        assert_ne!(a, b);
        assert_eq!(tasks.pending().collect::<Vec<_>>(), vec!["a", "b"]);

        tasks.cancel(a);
        tasks.cancel(a);
        assert!(!tasks.is_pending(a));
        assert_eq!(tasks.len(), 1);

        tasks.cancel(b);
        assert!(tasks.is_idle());
    }

    #[test]
    fn no_frames_never_schedules() {
        assert!(NoFrames.request("a").is_none());
    }
}
