//! Fundamental geometric and simulation types.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used for every collision test.
/// Invariant: `min <= max` componentwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "Aabb min must not exceed max");
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Closed-interval overlap test: boxes sharing a face intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// The player's pose on the floor plane plus view pitch.
///
/// `angle` is yaw in radians; 0 faces world -z. `pitch` only tilts the view
/// and never affects movement direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub z: f32,
    pub angle: f32,
    pub pitch: f32,
}

impl Player {
    pub fn new(x: f32, z: f32, angle: f32) -> Self {
        Self {
            x,
            z,
            angle,
            pitch: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Unit vector for "forward" on the floor plane: `(-sin a, -cos a)`.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(-self.angle.sin(), -self.angle.cos())
    }

    /// Unit vector for "strafe right" on the floor plane: `(cos a, -sin a)`.
    pub fn right(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), -self.angle.sin())
    }

    /// Camera look direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let flat = self.forward() * self.pitch.cos();
        Vec3::new(flat.x, self.pitch.sin(), flat.y).normalize_or_zero()
    }

    pub fn pose(&self) -> PlayerPose {
        PlayerPose {
            x: self.x,
            z: self.z,
            angle: self.angle,
        }
    }
}

/// What the pose sink receives every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub x: f32,
    pub z: f32,
    pub angle: f32,
}

/// Head-bob accumulator for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadBob {
    pub phase: f32,
    pub eye_height: f32,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self {
            phase: 0.0,
            eye_height: crate::constants::BASE_EYE_HEIGHT,
        }
    }
}

/// One entry of the per-frame creature position list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreaturePosition {
    pub index: u32,
    pub x: f32,
    pub z: f32,
}

/// A live projectile as seen by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub remaining_life: u32,
}

/// Opaque handle to a visual owned by the render collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);
