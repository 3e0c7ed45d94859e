//! Pursuit behavior.
//!
//! Pure functions on plain data. The caller supplies the level through the
//! [`Terrain`] trait so this crate stays free of any ECS or index type.

use glam::{Vec2, Vec3};

use delve_core::constants::{CREATURE_DEAD_ZONE, CREATURE_HALF_EXTENTS, CREATURE_MOVE_SPEED};
use delve_core::types::Aabb;

/// Static level queries a creature needs to validate a step.
pub trait Terrain {
    /// Whether the world point `(x, z)` lies on a floor cell of the grid.
    fn is_floor_at(&self, position: Vec2) -> bool;

    /// Whether `aabb` intersects any static wall box.
    fn hits_wall(&self, aabb: &Aabb) -> bool;
}

/// Input to the pursuit step for a single creature.
#[derive(Debug, Clone, Copy)]
pub struct PursuitContext {
    pub position: Vec2,
    pub vertical_offset: f32,
    pub target: Vec2,
    pub speed: f32,
    pub dead_zone: f32,
}

impl PursuitContext {
    /// Context with the default speed and dead zone.
    pub fn new(position: Vec2, vertical_offset: f32, target: Vec2) -> Self {
        Self {
            position,
            vertical_offset,
            target,
            speed: CREATURE_MOVE_SPEED,
            dead_zone: CREATURE_DEAD_ZONE,
        }
    }
}

/// Why a step was not taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// The candidate cell is outside the grid or a wall cell.
    Grid,
    /// The candidate box intersects a wall box.
    WallBox,
}

/// Result of one pursuit step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Within the dead zone; the creature holds position.
    Holding,
    /// The step was rejected and dropped for this frame.
    Blocked(Blocked),
    /// The creature moved to the new position.
    Moved(Vec2),
}

impl StepOutcome {
    /// Position after applying this outcome to `from`.
    pub fn resolve(self, from: Vec2) -> Vec2 {
        match self {
            StepOutcome::Moved(to) => to,
            StepOutcome::Holding | StepOutcome::Blocked(_) => from,
        }
    }
}

/// Candidate position one step toward the target, or `None` inside the dead zone.
pub fn candidate(ctx: &PursuitContext) -> Option<Vec2> {
    let to_target = ctx.target - ctx.position;
    let distance = to_target.length();
    if distance <= ctx.dead_zone {
        return None;
    }
    Some(ctx.position + to_target / distance * ctx.speed)
}

/// Run one pursuit step: propose, then validate against grid and walls.
///
/// The grid test and the box test are both required. The box test is the
/// ground truth shared with the movement and projectile systems.
pub fn step(ctx: &PursuitContext, terrain: &impl Terrain) -> StepOutcome {
    let Some(next) = candidate(ctx) else {
        return StepOutcome::Holding;
    };

    if !terrain.is_floor_at(next) {
        return StepOutcome::Blocked(Blocked::Grid);
    }

    if terrain.hits_wall(&creature_box(next, ctx.vertical_offset)) {
        return StepOutcome::Blocked(Blocked::WallBox);
    }

    StepOutcome::Moved(next)
}

/// Bounding box of a creature floating at `vertical_offset` above `(x, z)`.
pub fn creature_box(position: Vec2, vertical_offset: f32) -> Aabb {
    Aabb::from_center_half_extents(
        Vec3::new(position.x, vertical_offset, position.y),
        Vec3::from_array(CREATURE_HALF_EXTENTS),
    )
}
