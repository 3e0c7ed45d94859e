//! Static collision index: one box per wall cell.
//!
//! Built once per level and never mutated. Queries are a linear scan, which
//! is fine for maps of a few dozen cells per axis. Larger maps should swap in
//! a bucketed grid or BVH behind the same `intersects_any` contract.

use glam::Vec3;

use delve_core::map::{GridMap, WorldTransform};
use delve_core::types::Aabb;

#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    walls: Vec<Aabb>,
}

impl CollisionIndex {
    /// Empty index; intersects nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One `cell_size x wall_height x cell_size` box per wall cell, standing on y = 0.
    pub fn build(map: &GridMap, transform: &WorldTransform, wall_height: f32) -> Self {
        let half = Vec3::new(
            transform.cell_size / 2.0,
            wall_height / 2.0,
            transform.cell_size / 2.0,
        );
        let walls = map
            .wall_cells()
            .map(|(row, col)| {
                let center = transform.cell_to_world(row, col);
                Aabb::from_center_half_extents(Vec3::new(center.x, half.y, center.y), half)
            })
            .collect();
        Self { walls }
    }

    pub fn intersects_any(&self, aabb: &Aabb) -> bool {
        self.walls.iter().any(|wall| wall.intersects(aabb))
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
