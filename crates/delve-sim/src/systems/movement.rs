//! Movement controller: held input -> next player pose.
//!
//! Turning, then per-axis translation with collision rejection, then head bob.
//! Axes are tried independently so the player slides along walls.

use glam::{Vec2, Vec3};
use hecs::World;

use delve_core::components::{BoundingBox, Creature};
use delve_core::constants::*;
use delve_core::enums::Key;
use delve_core::types::{Aabb, HeadBob, Player};

use crate::collision::CollisionIndex;
use crate::input::InputSnapshot;

/// Run one frame of player movement. Returns true when any translation was attempted.
pub fn run(
    world: &World,
    collision: &CollisionIndex,
    input: &InputSnapshot,
    player: &mut Player,
    head_bob: &mut HeadBob,
) -> bool {
    turn(input, player);

    let sprinting = input.is_held(Key::Sprint);
    let delta = translation(input, player, sprinting);
    let moving = delta != Vec2::ZERO;

    if moving {
        let creature_boxes: Vec<Aabb> = world
            .query::<(&Creature, &BoundingBox)>()
            .iter()
            .map(|(_, (_, bbox))| bbox.0)
            .collect();
        let is_clear = |candidate: Vec2| {
            let aabb = player_box(candidate);
            !collision.intersects_any(&aabb) && !creature_boxes.iter().any(|b| b.intersects(&aabb))
        };

        if delta.x != 0.0 && is_clear(Vec2::new(player.x + delta.x, player.z)) {
            player.x += delta.x;
        }
        if delta.y != 0.0 && is_clear(Vec2::new(player.x, player.z + delta.y)) {
            player.z += delta.y;
        }
    }

    update_head_bob(head_bob, moving, sprinting);
    moving
}

/// Validation box around a candidate floor position, from the floor to eye height.
pub fn player_box(position: Vec2) -> Aabb {
    let half_height = BASE_EYE_HEIGHT / 2.0;
    Aabb::from_center_half_extents(
        Vec3::new(position.x, half_height, position.y),
        Vec3::new(PLAYER_HALF_WIDTH, half_height, PLAYER_HALF_WIDTH),
    )
}

fn turn(input: &InputSnapshot, player: &mut Player) {
    if input.pointer_captured {
        player.angle -= input.pointer_delta.x * POINTER_SENSITIVITY;
        player.pitch =
            (player.pitch - input.pointer_delta.y * POINTER_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    } else {
        if input.is_held(Key::TurnLeft) {
            player.angle += TURN_STEP;
        }
        if input.is_held(Key::TurnRight) {
            player.angle -= TURN_STEP;
        }
    }
}

/// Desired displacement this frame on the floor plane (x, z).
///
/// With the pointer free, strafe keys move along world X. With the pointer
/// captured, strafing is camera-relative and the turn keys strafe too,
/// since yaw comes from the pointer.
fn translation(input: &InputSnapshot, player: &Player, sprinting: bool) -> Vec2 {
    let speed = if sprinting {
        PLAYER_MOVE_SPEED * SPRINT_MULTIPLIER
    } else {
        PLAYER_MOVE_SPEED
    };

    let mut delta = Vec2::ZERO;
    if input.is_held(Key::Forward) {
        delta += player.forward() * speed;
    }
    if input.is_held(Key::Back) {
        delta -= player.forward() * speed;
    }

    if input.pointer_captured {
        let right = player.right();
        if input.is_held(Key::StrafeLeft) || input.is_held(Key::TurnLeft) {
            delta -= right * speed;
        }
        if input.is_held(Key::StrafeRight) || input.is_held(Key::TurnRight) {
            delta += right * speed;
        }
    } else {
        if input.is_held(Key::StrafeLeft) {
            delta.x -= speed;
        }
        if input.is_held(Key::StrafeRight) {
            delta.x += speed;
        }
    }
    delta
}

fn update_head_bob(head_bob: &mut HeadBob, moving: bool, sprinting: bool) {
    if moving {
        let step = if sprinting {
            HEAD_BOB_STEP * HEAD_BOB_SPRINT_FACTOR
        } else {
            HEAD_BOB_STEP
        };
        head_bob.phase += step;
        head_bob.eye_height = BASE_EYE_HEIGHT + head_bob.phase.sin() * HEAD_BOB_AMPLITUDE;
    } else {
        head_bob.eye_height =
            BASE_EYE_HEIGHT + (head_bob.eye_height - BASE_EYE_HEIGHT) * HEAD_BOB_DECAY;
        head_bob.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn held(keys: &[Key], captured: bool) -> InputSnapshot {
        InputSnapshot {
            held: keys.iter().copied().collect::<HashSet<_>>(),
            pointer_delta: Vec2::ZERO,
            pointer_captured: captured,
        }
    }

    #[test]
    fn test_uncaptured_strafe_is_world_relative() {
        let player = Player::new(0.0, 0.0, 1.0);
        let delta = translation(&held(&[Key::StrafeRight], false), &player, false);
        assert_eq!(delta, Vec2::new(PLAYER_MOVE_SPEED, 0.0));
    }

    #[test]
    fn test_captured_strafe_is_camera_relative() {
        let player = Player::new(0.0, 0.0, 1.0);
        let delta = translation(&held(&[Key::StrafeRight], true), &player, false);
        let expected = player.right() * PLAYER_MOVE_SPEED;
        assert!((delta - expected).length() < 1e-6);

        // Turn keys strafe while captured and do not turn.
        let mut turned = player;
        let input = held(&[Key::TurnLeft], true);
        turn(&input, &mut turned);
        assert_eq!(turned.angle, player.angle);
        let delta = translation(&input, &player, false);
        assert!((delta + expected).length() < 1e-6);
    }

    #[test]
    fn test_sprint_doubles_speed() {
        let player = Player::new(0.0, 0.0, 0.0);
        let delta = translation(&held(&[Key::Forward], false), &player, true);
        assert!((delta.length() - PLAYER_MOVE_SPEED * SPRINT_MULTIPLIER).abs() < 1e-6);
    }

    #[test]
    fn test_keyboard_turn_step() {
        let mut player = Player::new(0.0, 0.0, 0.0);
        turn(&held(&[Key::TurnLeft], false), &mut player);
        assert!((player.angle - TURN_STEP).abs() < 1e-6);
        turn(&held(&[Key::TurnRight], false), &mut player);
        assert!(player.angle.abs() < 1e-6);
    }

    #[test]
    fn test_pointer_look_clamps_pitch() {
        let mut player = Player::new(0.0, 0.0, 0.0);
        let mut input = held(&[], true);
        input.pointer_delta = Vec2::new(100.0, -10_000.0);
        turn(&input, &mut player);
        assert!((player.angle + 100.0 * POINTER_SENSITIVITY).abs() < 1e-6);
        assert_eq!(player.pitch, MAX_PITCH);
    }

    #[test]
    fn test_head_bob_decays_when_stopping() {
        let mut bob = HeadBob::default();
        for _ in 0..10 {
            update_head_bob(&mut bob, true, false);
        }
        assert!((bob.phase - 10.0 * HEAD_BOB_STEP).abs() < 1e-4);
        let offset = bob.eye_height - BASE_EYE_HEIGHT;
        assert!(offset.abs() > 0.0);

        update_head_bob(&mut bob, false, false);
        assert_eq!(bob.phase, 0.0);
        assert!(((bob.eye_height - BASE_EYE_HEIGHT) - offset * HEAD_BOB_DECAY).abs() < 1e-6);

        for _ in 0..200 {
            update_head_bob(&mut bob, false, false);
        }
        assert!((bob.eye_height - BASE_EYE_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_sprint_speeds_up_bob() {
        let mut bob = HeadBob::default();
        update_head_bob(&mut bob, true, true);
        assert!((bob.phase - HEAD_BOB_STEP * HEAD_BOB_SPRINT_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_player_box_spans_floor_to_eye() {
        let aabb = player_box(Vec2::new(1.0, 2.0));
        assert!(aabb.min.y.abs() < 1e-6);
        assert!((aabb.max.y - BASE_EYE_HEIGHT).abs() < 1e-6);
        assert!((aabb.min.x - (1.0 - PLAYER_HALF_WIDTH)).abs() < 1e-6);
    }
}
