//! Draw step: push current transforms into the render collection and present.

use glam::{Vec2, Vec3};
use hecs::World;

use delve_core::components::{CreatureMotion, Projectile, Visuals};
use delve_core::types::Player;

use crate::render::RenderBackend;

/// Distance of the eyes in front of the body center, toward the player.
const EYE_FORWARD: f32 = 0.35;
/// Half spacing between the eyes.
const EYE_SPREAD: f32 = 0.15;
const EYE_RAISE: f32 = 0.15;

pub fn run(world: &World, renderer: &mut dyn RenderBackend, player: &Player, eye_height: f32) {
    for (_entity, (motion, visuals)) in world.query::<(&CreatureMotion, &Visuals)>().iter() {
        let body = Vec3::new(motion.position.x, motion.vertical_offset, motion.position.y);
        let facing = (player.position() - motion.position).normalize_or(Vec2::NEG_Y);
        let side = facing.perp() * EYE_SPREAD;

        let mut handles = visuals.handles.iter();
        if let Some(&handle) = handles.next() {
            renderer.set_transform(handle, body);
        }
        for (&handle, sign) in handles.zip([1.0f32, -1.0]) {
            let eye = motion.position + facing * EYE_FORWARD + side * sign;
            renderer.set_transform(handle, Vec3::new(eye.x, body.y + EYE_RAISE, eye.y));
            renderer.set_intensity(handle, motion.glow);
        }
    }

    for (_entity, (projectile, visuals)) in world.query::<(&Projectile, &Visuals)>().iter() {
        for &handle in &visuals.handles {
            renderer.set_transform(handle, projectile.position);
        }
    }

    renderer.set_camera(
        Vec3::new(player.x, eye_height, player.z),
        player.angle,
        player.pitch,
    );
    renderer.draw();
}
