//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{Aabb, VisualHandle};

/// Marks an entity as a living creature. Dead creatures are despawned, so
/// membership in the world is what "alive" means.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Creature {
    /// Spawn order; scanned highest first by projectiles, offsets the animation phase.
    pub index: u32,
}

/// Creature pose and cosmetic state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatureMotion {
    /// World (x, z).
    pub position: Vec2,
    /// Height of the body center above the floor.
    pub vertical_offset: f32,
    /// Eye glow intensity.
    pub glow: f32,
}

/// Kinetic bolt in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    /// World units per frame.
    pub velocity: Vec3,
    /// Frames left before the bolt expires.
    pub remaining_life: u32,
}

/// Collision volume, recomputed every frame from the owner's position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundingBox(pub Aabb);

/// Render-collection handles owned by this entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Visuals {
    pub handles: Vec<VisualHandle>,
}
