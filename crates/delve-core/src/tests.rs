//! Tests for the grid map, world transform, bounding boxes and serde formats.

use glam::Vec3;

use crate::commands::{InputEvent, PlayerCommand};
use crate::enums::*;
use crate::error::MapError;
use crate::events::FrameEvent;
use crate::map::{GridMap, WorldTransform};
use crate::state::FrameSnapshot;
use crate::types::{Aabb, Player, SimTime};

fn ring_map(size: usize) -> GridMap {
    let rows: Vec<Vec<u8>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| u8::from(r == 0 || c == 0 || r == size - 1 || c == size - 1))
                .collect()
        })
        .collect();
    GridMap::from_rows(&rows).unwrap()
}

// ---- GridMap ----

#[test]
fn test_ring_map_dimensions_and_counts() {
    let map = ring_map(8);
    assert_eq!(map.width(), 8);
    assert_eq!(map.height(), 8);
    assert_eq!(map.open_cell_count(), 36);
    assert_eq!(map.wall_cells().count(), 28);
}

#[test]
fn test_spawn_is_first_floor_cell_row_major() {
    let map = GridMap::from_rows(&[[1u8, 1, 1], [1, 1, 0], [0, 1, 1]]).unwrap();
    assert_eq!(map.spawn_cell(), (1, 2));
    assert_eq!(ring_map(8).spawn_cell(), (1, 1));
}

#[test]
fn test_ragged_rows_rejected() {
    let rows = vec![vec![1, 1, 1], vec![1, 0], vec![1, 1, 1]];
    let err = GridMap::from_rows(&rows).unwrap_err();
    assert_eq!(
        err,
        MapError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_unknown_code_rejected() {
    let err = GridMap::from_rows(&[[0u8, 2]]).unwrap_err();
    assert_eq!(
        err,
        MapError::UnknownCell {
            row: 0,
            col: 1,
            code: 2
        }
    );
}

#[test]
fn test_all_wall_map_rejected() {
    assert_eq!(
        GridMap::from_rows(&[[1u8, 1], [1, 1]]).unwrap_err(),
        MapError::NoFloor
    );
}

#[test]
fn test_empty_map_rejected() {
    let rows: Vec<Vec<u8>> = Vec::new();
    assert_eq!(GridMap::from_rows(&rows).unwrap_err(), MapError::Empty);
    assert_eq!(
        GridMap::from_rows(&[Vec::<u8>::new()]).unwrap_err(),
        MapError::Empty
    );
}

#[test]
fn test_out_of_bounds_cells_are_blocked() {
    let map = ring_map(4);
    assert_eq!(map.cell(4, 0), None);
    assert_eq!(map.cell(0, 4), None);
    assert!(!map.is_floor(9, 9));
    assert!(map.is_floor(1, 1));
    assert!(!map.is_floor(0, 0));
}

#[test]
fn test_map_json_round_trip_and_validation() {
    let map: GridMap = serde_json::from_str("[[1,1,1],[1,0,1],[1,1,1]]").unwrap();
    assert_eq!(map.open_cell_count(), 1);
    assert_eq!(serde_json::to_string(&map).unwrap(), "[[1,1,1],[1,0,1],[1,1,1]]");

    let ragged = serde_json::from_str::<GridMap>("[[1,1,1],[1,0]]");
    assert!(ragged.is_err(), "ragged JSON map must be rejected");
}

// ---- WorldTransform ----

#[test]
fn test_transform_inverse_is_exact_on_cell_centers() {
    for (width, height) in [(8, 8), (7, 5), (1, 1)] {
        let transform = WorldTransform::new(2.0, width, height);
        for row in 0..height {
            for col in 0..width {
                let p = transform.cell_to_world(row, col);
                assert_eq!(transform.world_to_cell(p.x, p.y), Some((row, col)));
            }
        }
    }
}

#[test]
fn test_transform_centering() {
    let transform = WorldTransform::new(2.0, 8, 8);
    let p = transform.cell_to_world(4, 4);
    assert_eq!((p.x, p.y), (0.0, 0.0));
    let p = transform.cell_to_world(1, 1);
    assert_eq!((p.x, p.y), (-6.0, -6.0));
}

#[test]
fn test_transform_outside_grid_is_none() {
    let transform = WorldTransform::new(2.0, 8, 8);
    assert_eq!(transform.world_to_cell(-9.5, 0.0), None);
    assert_eq!(transform.world_to_cell(0.0, 7.5), None);
    assert_eq!(transform.world_to_cell(f32::NAN, 0.0), None);
    // Within half a cell of the edge center still resolves.
    assert_eq!(transform.world_to_cell(-8.9, -8.9), Some((0, 0)));
}

// ---- Aabb ----

#[test]
fn test_aabb_overlap_and_separation() {
    let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(1.0));
    let b = Aabb::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
    let c = Aabb::from_center_half_extents(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(0.5));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    assert_eq!(b.center(), Vec3::new(1.5, 0.0, 0.0));
}

#[test]
fn test_aabb_touching_faces_intersect() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(a.intersects(&b));
}

#[test]
fn test_aabb_vertical_separation() {
    let floor_box = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    let above = Aabb::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.0, 2.0, 1.0));
    assert!(!floor_box.intersects(&above));
}

// ---- Player ----

#[test]
fn test_player_basis_vectors() {
    let player = Player::new(0.0, 0.0, 0.0);
    let f = player.forward();
    assert!((f.x - 0.0).abs() < 1e-6 && (f.y + 1.0).abs() < 1e-6);
    let r = player.right();
    assert!((r.x - 1.0).abs() < 1e-6 && r.y.abs() < 1e-6);

    let turned = Player::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
    let f = turned.forward();
    assert!((f.x + 1.0).abs() < 1e-6 && f.y.abs() < 1e-6);
}

#[test]
fn test_look_direction_is_unit_and_follows_pitch() {
    let mut player = Player::new(0.0, 0.0, 0.3);
    player.pitch = 0.5;
    let dir = player.look_direction();
    assert!((dir.length() - 1.0).abs() < 1e-5);
    assert!(dir.y > 0.0);
}

// ---- Time ----

#[test]
fn test_sixty_ticks_one_second() {
    let mut time = SimTime::default();
    for _ in 0..60 {
        time.advance();
    }
    assert_eq!(time.tick, 60);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

// ---- Serde formats ----

#[test]
fn test_player_command_tagged_format() {
    let cmd = PlayerCommand::Fire {
        source: FireSource::Pointer,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert_eq!(json, r#"{"type":"Fire","source":"Pointer"}"#);

    let load: PlayerCommand =
        serde_json::from_str(r#"{"type":"LoadMap","map":[[1,1,1],[1,0,1],[1,1,1]]}"#).unwrap();
    match load {
        PlayerCommand::LoadMap { map } => assert_eq!(map.spawn_cell(), (1, 1)),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_input_event_format() {
    let event: InputEvent = serde_json::from_str(r#"{"type":"KeyDown","key":"Forward"}"#).unwrap();
    assert_eq!(event, InputEvent::KeyDown { key: Key::Forward });
}

#[test]
fn test_snapshot_serializes_events() {
    let snapshot = FrameSnapshot {
        events: vec![FrameEvent::CreatureKilled {
            index: 2,
            x: 1.0,
            z: -1.0,
        }],
        ..Default::default()
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains(r#""type":"CreatureKilled""#));
    let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
