//! Grid map model and the grid <-> world transform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Cell;
use crate::error::MapError;

/// Rectangular occupancy grid describing one dungeon level.
///
/// Validated on construction: rectangular, only floor/wall codes, at least one
/// floor cell. Never mutated afterwards; a new level replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Row-major cells.
    cells: Vec<Cell>,
}

impl GridMap {
    /// Build a map from rows of cell codes (0 = floor, 1 = wall).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or(MapError::UnknownCell { row, col, code })?;
                cells.push(cell);
            }
        }

        if !cells.contains(&Cell::Floor) {
            return Err(MapError::NoFloor);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_floor(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) == Some(Cell::Floor)
    }

    /// First floor cell scanning row-major.
    pub fn spawn_cell(&self) -> (usize, usize) {
        // Construction guarantees a floor cell exists.
        self.floor_cells().next().unwrap_or((0, 0))
    }

    /// All floor cells in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells_of(Cell::Floor)
    }

    /// All wall cells in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells_of(Cell::Wall)
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Floor).count()
    }

    /// Rows of raw cell codes.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    fn cells_of(&self, kind: Cell) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == kind)
            .map(move |(i, _)| (i / width, i % width))
    }
}

impl TryFrom<Vec<Vec<u8>>> for GridMap {
    type Error = MapError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        GridMap::from_rows(&rows)
    }
}

impl From<GridMap> for Vec<Vec<u8>> {
    fn from(map: GridMap) -> Self {
        map.rows()
    }
}

/// Maps grid cells to world coordinates on the floor plane (x, z) and back.
///
/// Cell centers sit at `((col - width/2) * cell_size, (row - height/2) * cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    pub cell_size: f32,
    pub width: usize,
    pub height: usize,
}

impl WorldTransform {
    pub fn new(cell_size: f32, width: usize, height: usize) -> Self {
        Self {
            cell_size,
            width,
            height,
        }
    }

    pub fn for_map(map: &GridMap, cell_size: f32) -> Self {
        Self::new(cell_size, map.width(), map.height())
    }

    /// World (x, z) of the center of cell `(row, col)`.
    pub fn cell_to_world(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            (col as f32 - self.width as f32 / 2.0) * self.cell_size,
            (row as f32 - self.height as f32 / 2.0) * self.cell_size,
        )
    }

    /// Cell containing world point `(x, z)`, or `None` outside the grid.
    pub fn world_to_cell(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let col = (x / self.cell_size + self.width as f32 / 2.0).round();
        let row = (z / self.cell_size + self.height as f32 / 2.0).round();
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some((row, col))
    }
}
