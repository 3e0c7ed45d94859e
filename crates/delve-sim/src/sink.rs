//! Per-frame output sinks for external collaborators (HUD, minimap, persistence).

use delve_core::types::{CreaturePosition, PlayerPose};

/// Receives the player pose and creature positions once per frame.
///
/// No throttling happens here; a sink that needs it does it itself.
pub trait FrameSink {
    /// Called after movement resolves, every frame a level is loaded.
    fn emit_pose(&mut self, pose: &PlayerPose);

    /// Called once after every creature has stepped, sorted by index.
    fn emit_creatures(&mut self, creatures: &[CreaturePosition]);
}
