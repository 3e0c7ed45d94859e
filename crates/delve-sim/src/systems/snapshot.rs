//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use delve_core::components::{Creature, CreatureMotion, Projectile};
use delve_core::events::FrameEvent;
use delve_core::state::FrameSnapshot;
use delve_core::types::{CreaturePosition, HeadBob, Player, ProjectileView, SimTime};

/// Frame-level facts that live outside the ECS world.
pub struct FrameFacts {
    pub time: SimTime,
    pub map_loaded: bool,
    pub pending_cleanup: usize,
    pub pointer_captured: bool,
    pub menu_visible: bool,
}

pub fn build_snapshot(
    world: &World,
    facts: FrameFacts,
    player: &Player,
    head_bob: &HeadBob,
    events: Vec<FrameEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: facts.time,
        map_loaded: facts.map_loaded,
        player: player.pose(),
        pitch: player.pitch,
        eye_height: head_bob.eye_height,
        creatures: build_creatures(world),
        projectiles: build_projectiles(world),
        pending_cleanup: facts.pending_cleanup,
        pointer_captured: facts.pointer_captured,
        menu_visible: facts.menu_visible,
        events,
    }
}

/// Living creatures sorted by index.
pub fn build_creatures(world: &World) -> Vec<CreaturePosition> {
    let mut creatures: Vec<CreaturePosition> = world
        .query::<(&Creature, &CreatureMotion)>()
        .iter()
        .map(|(_, (creature, motion))| CreaturePosition {
            index: creature.index,
            x: motion.position.x,
            z: motion.position.y,
        })
        .collect();

    creatures.sort_by_key(|c| c.index);
    creatures
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, projectile)| ProjectileView {
            position: projectile.position,
            remaining_life: projectile.remaining_life,
        })
        .collect();

    // Oldest (lowest remaining life) first.
    projectiles.sort_by_key(|p| p.remaining_life);
    projectiles
}
