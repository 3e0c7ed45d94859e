//! Creature AI system: steps every creature toward the player each frame.
//!
//! Calls the pursuit step from delve-creature-ai, then updates ECS
//! components and the cosmetic animation.

use glam::Vec2;
use hecs::World;

use delve_core::components::{BoundingBox, Creature, CreatureMotion};
use delve_core::map::{GridMap, WorldTransform};
use delve_core::types::{Aabb, CreaturePosition};

use delve_creature_ai::animation::animate;
use delve_creature_ai::pursuit::{creature_box, step, PursuitContext, Terrain};

use crate::collision::CollisionIndex;

/// The loaded level as seen by the pursuit step.
pub struct LevelTerrain<'a> {
    pub map: &'a GridMap,
    pub transform: &'a WorldTransform,
    pub collision: &'a CollisionIndex,
}

impl Terrain for LevelTerrain<'_> {
    fn is_floor_at(&self, position: Vec2) -> bool {
        self.transform
            .world_to_cell(position.x, position.y)
            .is_some_and(|(row, col)| self.map.is_floor(row, col))
    }

    fn hits_wall(&self, aabb: &Aabb) -> bool {
        self.collision.intersects_any(aabb)
    }
}

/// Step every creature, then return the full position list sorted by index.
pub fn run(
    world: &mut World,
    terrain: &LevelTerrain<'_>,
    target: Vec2,
    time_secs: f64,
) -> Vec<CreaturePosition> {
    let mut positions = Vec::new();

    for (_entity, (creature, motion, bbox)) in
        world.query_mut::<(&Creature, &mut CreatureMotion, &mut BoundingBox)>()
    {
        let ctx = PursuitContext::new(motion.position, motion.vertical_offset, target);
        motion.position = step(&ctx, terrain).resolve(motion.position);

        let anim = animate(time_secs, creature.index);
        motion.vertical_offset = anim.vertical_offset;
        motion.glow = anim.glow;
        bbox.0 = creature_box(motion.position, motion.vertical_offset);

        positions.push(CreaturePosition {
            index: creature.index,
            x: motion.position.x,
            z: motion.position.y,
        });
    }

    positions.sort_by_key(|p| p.index);
    positions
}
