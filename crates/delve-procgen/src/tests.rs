//! Tests for dungeon generation.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use delve_core::error::MapError;
use delve_core::map::GridMap;

use crate::{generate, DungeonParams, Room};

fn generate_seeded(width: usize, height: usize, seed: u64) -> GridMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(&DungeonParams::new(width, height), &mut rng).unwrap()
}

fn reachable_floor(map: &GridMap) -> usize {
    let mut seen = vec![vec![false; map.width()]; map.height()];
    let mut queue = VecDeque::from([map.spawn_cell()]);
    let mut count = 0;
    while let Some((row, col)) = queue.pop_front() {
        if seen[row][col] || !map.is_floor(row, col) {
            continue;
        }
        seen[row][col] = true;
        count += 1;
        let neighbors = [
            (row.wrapping_sub(1), col),
            (row + 1, col),
            (row, col.wrapping_sub(1)),
            (row, col + 1),
        ];
        for (r, c) in neighbors {
            if map.is_floor(r, c) && !seen[r][c] {
                queue.push_back((r, c));
            }
        }
    }
    count
}

#[test]
fn test_same_seed_same_dungeon() {
    assert_eq!(generate_seeded(20, 16, 7), generate_seeded(20, 16, 7));
}

#[test]
fn test_different_seeds_diverge() {
    let maps: Vec<GridMap> = (0..8).map(|seed| generate_seeded(24, 24, seed)).collect();
    assert!(maps.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_border_is_solid_wall() {
    for seed in 0..20 {
        let map = generate_seeded(16, 12, seed);
        for col in 0..map.width() {
            assert!(!map.is_floor(0, col));
            assert!(!map.is_floor(map.height() - 1, col));
        }
        for row in 0..map.height() {
            assert!(!map.is_floor(row, 0));
            assert!(!map.is_floor(row, map.width() - 1));
        }
    }
}

#[test]
fn test_every_floor_cell_is_connected() {
    for seed in 0..20 {
        let map = generate_seeded(20, 20, seed);
        assert!(map.open_cell_count() > 0);
        assert_eq!(reachable_floor(&map), map.open_cell_count(), "seed {seed}");
    }
}

#[test]
fn test_smallest_map_still_has_floor() {
    for seed in 0..20 {
        let map = generate_seeded(5, 5, seed);
        assert!(map.open_cell_count() >= 1);
    }
}

#[test]
fn test_too_small_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = generate(&DungeonParams::new(4, 10), &mut rng).unwrap_err();
    assert_eq!(
        err,
        MapError::TooSmall {
            width: 4,
            height: 10,
            min: 5
        }
    );
}

#[test]
fn test_room_intersection_uses_margin() {
    let a = Room {
        row: 1,
        col: 1,
        rows: 2,
        cols: 2,
    };
    let adjacent = Room {
        row: 1,
        col: 3,
        rows: 2,
        cols: 2,
    };
    let apart = Room {
        row: 1,
        col: 4,
        rows: 2,
        cols: 2,
    };
    assert!(a.intersects(&adjacent));
    assert!(!a.intersects(&apart));
    assert_eq!(a.center(), (2, 2));
}
