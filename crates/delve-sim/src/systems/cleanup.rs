//! Cleanup system: releases queued creature visuals at a bounded rate.

use delve_core::events::FrameEvent;

use crate::cleanup_queue::CleanupQueue;
use crate::render::RenderBackend;

/// Drain this frame's share of the cleanup queue.
pub fn run(
    queue: &mut CleanupQueue,
    renderer: &mut dyn RenderBackend,
    current_tick: u64,
    events: &mut Vec<FrameEvent>,
) {
    for index in queue.drain(renderer, current_tick) {
        events.push(FrameEvent::CreatureReleased { index });
    }
}
