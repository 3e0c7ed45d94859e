//! Deferred cleanup queue for destroyed creatures.
//!
//! Killing a creature removes it from the world immediately but only queues
//! its visuals here. Each frame releases at most `drain_per_frame` entries,
//! and never an entry queued during the same frame. A mass kill or a level
//! teardown is spread across several frames instead of stalling one.

use std::collections::VecDeque;

use delve_core::constants::CLEANUP_DRAIN_PER_FRAME;
use delve_core::types::VisualHandle;

use crate::render::RenderBackend;

/// Everything a destroyed creature still owns in the render collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupEntry {
    pub creature_index: u32,
    pub visuals: Vec<VisualHandle>,
    /// Frame the creature was removed in.
    pub enqueued_tick: u64,
}

/// Unbounded FIFO with a per-frame drain cap.
#[derive(Debug, Clone)]
pub struct CleanupQueue {
    pending: VecDeque<CleanupEntry>,
    drain_per_frame: usize,
}

impl Default for CleanupQueue {
    fn default() -> Self {
        Self::new(CLEANUP_DRAIN_PER_FRAME)
    }
}

impl CleanupQueue {
    pub fn new(drain_per_frame: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            drain_per_frame: drain_per_frame.max(1),
        }
    }

    pub fn enqueue(&mut self, entry: CleanupEntry) {
        self.pending.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Release up to the per-frame cap of entries queued before `current_tick`.
    /// Returns the creature indices whose visuals were released.
    pub fn drain(&mut self, renderer: &mut dyn RenderBackend, current_tick: u64) -> Vec<u32> {
        let mut released = Vec::new();
        while released.len() < self.drain_per_frame {
            match self.pending.front() {
                Some(entry) if entry.enqueued_tick < current_tick => {}
                _ => break,
            }
            let Some(entry) = self.pending.pop_front() else {
                break;
            };
            for handle in entry.visuals {
                renderer.release(handle);
            }
            released.push(entry.creature_index);
        }
        released
    }
}
