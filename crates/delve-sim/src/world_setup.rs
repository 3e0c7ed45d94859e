//! Level construction and teardown.
//!
//! Builds the collision index and wall visuals for a map, places the player
//! and spawns the creature batch. Teardown hands creatures to the cleanup
//! queue instead of freeing them synchronously.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use delve_core::components::{BoundingBox, Creature, CreatureMotion, Projectile, Visuals};
use delve_core::constants::*;
use delve_core::enums::VisualKind;
use delve_core::events::FrameEvent;
use delve_core::map::{GridMap, WorldTransform};
use delve_core::types::Player;

use delve_creature_ai::animation::animate;
use delve_creature_ai::pursuit::creature_box;

use crate::cleanup_queue::{CleanupEntry, CleanupQueue};
use crate::collision::CollisionIndex;
use crate::engine::SimConfig;
use crate::render::RenderBackend;

/// Everything derived from one loaded map.
#[derive(Debug)]
pub struct Level {
    pub map: GridMap,
    pub transform: WorldTransform,
    pub collision: CollisionIndex,
    /// Entities holding one wall visual each.
    wall_entities: Vec<Entity>,
}

impl Level {
    /// Build the collision index and one wall visual per wall cell.
    pub fn build(
        map: GridMap,
        config: &SimConfig,
        world: &mut World,
        renderer: &mut dyn RenderBackend,
    ) -> Self {
        let transform = WorldTransform::for_map(&map, config.cell_size);
        let collision = CollisionIndex::build(&map, &transform, config.wall_height);

        let wall_entities = collision
            .walls()
            .iter()
            .map(|wall| {
                let handle = renderer.create(VisualKind::Wall, wall.center());
                world.spawn((Visuals {
                    handles: vec![handle],
                },))
            })
            .collect();

        Self {
            map,
            transform,
            collision,
            wall_entities,
        }
    }

    /// World position of the player spawn cell.
    pub fn spawn_point(&self) -> Vec2 {
        let (row, col) = self.map.spawn_cell();
        self.transform.cell_to_world(row, col)
    }

    pub fn wall_count(&self) -> usize {
        self.wall_entities.len()
    }
}

/// Creature batch size for a map with `open_cells` floor cells.
pub fn creature_count(open_cells: usize, config: &SimConfig) -> usize {
    let per = config.cells_per_creature.max(1);
    (open_cells / per).clamp(
        config.min_creatures.min(config.max_creatures),
        config.max_creatures,
    )
}

/// Player standing on the spawn cell, facing angle 0.
pub fn spawn_player(level: &Level) -> Player {
    let spawn = level.spawn_point();
    Player::new(spawn.x, spawn.y, 0.0)
}

/// Spawn the creature batch on floor cells sampled without replacement.
/// The player's spawn cell is never used. Returns the number spawned.
pub fn spawn_creatures(
    world: &mut World,
    level: &Level,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    renderer: &mut dyn RenderBackend,
    next_index: &mut u32,
) -> usize {
    let spawn_cell = level.map.spawn_cell();
    let candidates: Vec<(usize, usize)> = level
        .map
        .floor_cells()
        .filter(|&cell| cell != spawn_cell)
        .collect();
    let count = creature_count(level.map.open_cell_count(), config).min(candidates.len());

    let chosen: Vec<(usize, usize)> = candidates.choose_multiple(rng, count).copied().collect();
    for &(row, col) in &chosen {
        let position = level.transform.cell_to_world(row, col);
        spawn_creature(world, renderer, position, next_index);
    }
    chosen.len()
}

/// Spawn one creature at world `(x, z)` with a body and two eye visuals.
pub fn spawn_creature(
    world: &mut World,
    renderer: &mut dyn RenderBackend,
    position: Vec2,
    next_index: &mut u32,
) -> Entity {
    let index = *next_index;
    *next_index += 1;

    let anim = animate(0.0, index);
    let body = Vec3::new(position.x, anim.vertical_offset, position.y);
    let mut handles = Vec::with_capacity(CREATURE_VISUAL_PARTS);
    handles.push(renderer.create(VisualKind::CreatureBody, body));
    for _ in 1..CREATURE_VISUAL_PARTS {
        handles.push(renderer.create(VisualKind::CreatureEye, body));
    }

    world.spawn((
        Creature { index },
        CreatureMotion {
            position,
            vertical_offset: anim.vertical_offset,
            glow: anim.glow,
        },
        BoundingBox(creature_box(position, anim.vertical_offset)),
        Visuals { handles },
    ))
}

/// Tear down a level: walls and projectiles are released now, creatures are
/// handed to the cleanup queue.
pub fn teardown(
    world: &mut World,
    level: Level,
    renderer: &mut dyn RenderBackend,
    cleanup: &mut CleanupQueue,
    current_tick: u64,
    events: &mut Vec<FrameEvent>,
) {
    let mut immediate: Vec<Entity> = level.wall_entities;
    immediate.extend(
        world
            .query::<&Projectile>()
            .iter()
            .map(|(entity, _)| entity),
    );
    for entity in immediate {
        if let Ok(visuals) = world.remove_one::<Visuals>(entity) {
            for handle in visuals.handles {
                renderer.release(handle);
            }
        }
        let _ = world.despawn(entity);
    }

    let creatures: Vec<Entity> = world
        .query::<&Creature>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in creatures {
        despawn_creature(world, entity, cleanup, current_tick);
    }
    events.push(FrameEvent::MapUnloaded);
}

/// Remove a creature from the pool now and queue its visuals for a later
/// frame. Returns its index and last position.
pub fn despawn_creature(
    world: &mut World,
    entity: Entity,
    cleanup: &mut CleanupQueue,
    current_tick: u64,
) -> Option<(u32, Vec2)> {
    let index = world.get::<&Creature>(entity).ok()?.index;
    let position = world
        .get::<&CreatureMotion>(entity)
        .map(|m| m.position)
        .unwrap_or_default();
    let visuals = world
        .remove_one::<Visuals>(entity)
        .map(|v| v.handles)
        .unwrap_or_default();
    let _ = world.despawn(entity);

    cleanup.enqueue(CleanupEntry {
        creature_index: index,
        visuals,
        enqueued_tick: current_tick,
    });
    Some((index, position))
}
