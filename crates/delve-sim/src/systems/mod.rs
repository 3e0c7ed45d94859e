//! Systems that operate on the simulation world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or is passed in.

pub mod cleanup;
pub mod creature_ai;
pub mod draw;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
