//! Host-side errors.

use std::path::PathBuf;

use thiserror::Error;

use delve_core::error::MapError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid map: {0}")]
    Map(#[from] MapError),
    #[error("invalid config {path}: {field} must be a positive number, got {value}")]
    InvalidConfig {
        path: PathBuf,
        field: &'static str,
        value: f32,
    },
    #[error("invalid dungeon size {0:?}, expected WIDTHxHEIGHT")]
    BadSize(String),
    #[error("failed to start the game loop thread: {0}")]
    Spawn(#[source] std::io::Error),
}
