//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something notable that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FrameEvent {
    /// A level was built and populated.
    MapLoaded {
        width: usize,
        height: usize,
        creatures: usize,
    },
    /// The level was torn down.
    MapUnloaded,
    /// A projectile left the player.
    ProjectileFired { source: FireSource },
    /// A projectile was removed from play.
    ProjectileRetired {
        outcome: ProjectileOutcome,
        remaining_life: u32,
    },
    /// A creature was hit and removed from the pool.
    CreatureKilled { index: u32, x: f32, z: f32 },
    /// A destroyed creature's visuals were finally released.
    CreatureReleased { index: u32 },
}
