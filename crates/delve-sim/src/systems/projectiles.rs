//! Projectile system: spawn, advance, hit-test and retire kinetic bolts.
//!
//! Creatures are tested in reverse index order. The first creature a bolt
//! touches dies: it leaves the world this frame, but its visuals only go to
//! the cleanup queue. A retired bolt releases its own visual immediately.

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;

use delve_core::components::{BoundingBox, Creature, Projectile, Visuals};
use delve_core::constants::*;
use delve_core::enums::{FireSource, ProjectileOutcome, VisualKind};
use delve_core::events::FrameEvent;
use delve_core::types::{Aabb, Player};

use crate::cleanup_queue::CleanupQueue;
use crate::collision::CollisionIndex;
use crate::render::RenderBackend;
use crate::world_setup::despawn_creature;

/// Spawn one bolt just below the camera, flying along the look direction.
pub fn spawn(
    world: &mut World,
    renderer: &mut dyn RenderBackend,
    player: &Player,
    eye_height: f32,
    source: FireSource,
    events: &mut Vec<FrameEvent>,
) -> Entity {
    let position = Vec3::new(player.x, eye_height - PROJECTILE_DROP, player.z);
    let velocity = player.look_direction() * PROJECTILE_SPEED;
    let handle = renderer.create(VisualKind::Projectile, position);
    events.push(FrameEvent::ProjectileFired { source });

    world.spawn((
        Projectile {
            position,
            velocity,
            remaining_life: PROJECTILE_LIFETIME,
        },
        BoundingBox(projectile_box(position)),
        Visuals {
            handles: vec![handle],
        },
    ))
}

pub fn projectile_box(position: Vec3) -> Aabb {
    Aabb::from_center_half_extents(position, Vec3::splat(PROJECTILE_HALF_EXTENT))
}

/// Advance every live bolt by one frame and resolve hits.
pub fn run(
    world: &mut World,
    collision: &CollisionIndex,
    renderer: &mut dyn RenderBackend,
    cleanup: &mut CleanupQueue,
    current_tick: u64,
    events: &mut Vec<FrameEvent>,
) {
    // Living creatures, highest index first. A killed creature is removed
    // from this list so later bolts in the same frame cannot hit it again.
    let mut creatures: Vec<(Entity, u32, Aabb)> = world
        .query::<(&Creature, &BoundingBox)>()
        .iter()
        .map(|(entity, (creature, bbox))| (entity, creature.index, bbox.0))
        .collect();
    creatures.sort_by(|a, b| b.1.cmp(&a.1));

    let mut retired: Vec<(Entity, ProjectileOutcome, u32)> = Vec::new();
    let mut killed: Vec<Entity> = Vec::new();

    for (entity, (projectile, bbox)) in world.query_mut::<(&mut Projectile, &mut BoundingBox)>() {
        projectile.position += projectile.velocity;
        projectile.remaining_life = projectile.remaining_life.saturating_sub(1);
        bbox.0 = projectile_box(projectile.position);

        let hit_wall = collision.intersects_any(&bbox.0);

        let mut hit_creature = false;
        if let Some(slot) = creatures.iter().position(|(_, _, b)| b.intersects(&bbox.0)) {
            let (creature, _, _) = creatures.remove(slot);
            killed.push(creature);
            hit_creature = true;
        }

        // Creature outcome wins when both happen in the same frame.
        let outcome = if hit_creature {
            ProjectileOutcome::HitCreature
        } else if hit_wall {
            ProjectileOutcome::HitWall
        } else if projectile.remaining_life == 0 {
            ProjectileOutcome::Expired
        } else {
            continue;
        };
        retired.push((entity, outcome, projectile.remaining_life));
    }

    for entity in killed {
        kill_creature(world, entity, cleanup, current_tick, events);
    }

    for (entity, outcome, remaining_life) in retired {
        if let Ok(visuals) = world.remove_one::<Visuals>(entity) {
            for handle in visuals.handles {
                renderer.release(handle);
            }
        }
        let _ = world.despawn(entity);
        events.push(FrameEvent::ProjectileRetired {
            outcome,
            remaining_life,
        });
    }
}

/// Kill a creature hit by a bolt.
fn kill_creature(
    world: &mut World,
    entity: Entity,
    cleanup: &mut CleanupQueue,
    current_tick: u64,
    events: &mut Vec<FrameEvent>,
) {
    let Some((index, position)) = despawn_creature(world, entity, cleanup, current_tick) else {
        return;
    };
    debug!(
        "Creature {} killed at ({:.2}, {:.2}), {} pending cleanup",
        index,
        position.x,
        position.y,
        cleanup.len()
    );
    events.push(FrameEvent::CreatureKilled {
        index,
        x: position.x,
        z: position.y,
    });
}
