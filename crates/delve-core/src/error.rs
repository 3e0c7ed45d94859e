//! Errors surfaced to the map-loading collaborator.

use thiserror::Error;

/// Reasons a grid map is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no rows or no columns")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell code {code} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, code: u8 },
    #[error("map has no floor cell to spawn on")]
    NoFloor,
    #[error("map must be at least {min}x{min} cells, got {width}x{height}")]
    TooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
}
