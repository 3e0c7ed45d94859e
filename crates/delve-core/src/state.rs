//! Frame snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::events::FrameEvent;
use crate::types::{CreaturePosition, PlayerPose, ProjectileView, SimTime};

/// Complete simulation state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    /// False while the core idles without a map.
    pub map_loaded: bool,
    pub player: PlayerPose,
    /// View pitch (radians), never affects movement.
    pub pitch: f32,
    /// Camera height including head bob.
    pub eye_height: f32,
    /// Living creatures, sorted by index.
    pub creatures: Vec<CreaturePosition>,
    pub projectiles: Vec<ProjectileView>,
    /// Destroyed creatures whose visuals are not yet released.
    pub pending_cleanup: usize,
    pub pointer_captured: bool,
    pub menu_visible: bool,
    pub events: Vec<FrameEvent>,
}
