//! Creature AI for DELVE.
//!
//! Implements the pursuit step (steer toward the player, validated against
//! the grid and static walls) and the cosmetic floating animation.

pub mod animation;
pub mod pursuit;

pub use delve_core as core;
