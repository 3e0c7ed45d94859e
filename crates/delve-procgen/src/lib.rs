//! Procedural dungeon generation for DELVE.
//!
//! Carves non-overlapping rectangular rooms out of a solid grid and joins
//! consecutive rooms with L-shaped corridors. Deterministic for a given RNG.

use log::debug;
use rand::Rng;

use delve_core::constants::MIN_GENERATED_EDGE;
use delve_core::error::MapError;
use delve_core::map::GridMap;

pub use delve_core as core;

/// Generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonParams {
    pub width: usize,
    pub height: usize,
    /// Upper bound on placement attempts (and therefore rooms).
    pub max_rooms: usize,
    pub room_min: usize,
    pub room_max: usize,
}

impl DungeonParams {
    /// Defaults scaled to the map size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_rooms: (width * height / 24).clamp(2, 12),
            room_min: 2,
            room_max: 5,
        }
    }
}

/// Inclusive cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Room {
    pub fn center(&self) -> (usize, usize) {
        (self.row + self.rows / 2, self.col + self.cols / 2)
    }

    /// Overlap test with a one-cell margin so rooms never merge.
    pub fn intersects(&self, other: &Room) -> bool {
        self.row <= other.row + other.rows
            && self.row + self.rows >= other.row
            && self.col <= other.col + other.cols
            && self.col + self.cols >= other.col
    }
}

/// Generate a walled dungeon. The outer border is always wall.
pub fn generate(params: &DungeonParams, rng: &mut impl Rng) -> Result<GridMap, MapError> {
    let DungeonParams { width, height, .. } = *params;
    if width < MIN_GENERATED_EDGE || height < MIN_GENERATED_EDGE {
        return Err(MapError::TooSmall {
            width,
            height,
            min: MIN_GENERATED_EDGE,
        });
    }

    let mut grid = vec![vec![1u8; width]; height];
    let rooms = place_rooms(params, rng);

    for room in &rooms {
        carve_room(&mut grid, room);
    }
    for pair in rooms.windows(2) {
        let (r1, c1) = pair[0].center();
        let (r2, c2) = pair[1].center();
        if rng.gen_bool(0.5) {
            carve_horizontal(&mut grid, c1, c2, r1);
            carve_vertical(&mut grid, r1, r2, c2);
        } else {
            carve_vertical(&mut grid, r1, r2, c1);
            carve_horizontal(&mut grid, c1, c2, r2);
        }
    }

    debug!(
        "Generated {}x{} dungeon with {} rooms",
        width,
        height,
        rooms.len()
    );
    GridMap::from_rows(&grid)
}

fn place_rooms(params: &DungeonParams, rng: &mut impl Rng) -> Vec<Room> {
    // Interior excludes the one-cell border.
    let interior_rows = params.height - 2;
    let interior_cols = params.width - 2;
    let max_rows = params.room_max.min(interior_rows).max(1);
    let max_cols = params.room_max.min(interior_cols).max(1);
    let min_rows = params.room_min.clamp(1, max_rows);
    let min_cols = params.room_min.clamp(1, max_cols);

    let mut rooms: Vec<Room> = Vec::new();
    for _ in 0..params.max_rooms.max(1) {
        let rows = rng.gen_range(min_rows..=max_rows);
        let cols = rng.gen_range(min_cols..=max_cols);
        let row = rng.gen_range(1..=interior_rows - rows + 1);
        let col = rng.gen_range(1..=interior_cols - cols + 1);
        let room = Room {
            row,
            col,
            rows,
            cols,
        };
        if !rooms.iter().any(|other| room.intersects(other)) {
            rooms.push(room);
        }
    }
    rooms
}

fn carve_room(grid: &mut [Vec<u8>], room: &Room) {
    for row in grid.iter_mut().skip(room.row).take(room.rows) {
        for cell in row.iter_mut().skip(room.col).take(room.cols) {
            *cell = 0;
        }
    }
}

fn carve_horizontal(grid: &mut [Vec<u8>], c1: usize, c2: usize, row: usize) {
    for col in c1.min(c2)..=c1.max(c2) {
        grid[row][col] = 0;
    }
}

fn carve_vertical(grid: &mut [Vec<u8>], r1: usize, r2: usize, col: usize) {
    for row in r1.min(r2)..=r1.max(r2) {
        grid[row][col] = 0;
    }
}

#[cfg(test)]
mod tests;
