//! Core types and definitions for the DELVE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the grid map, world transform, bounding boxes, commands, input events,
//! frame snapshots, events and constants.
//! It has no dependency on an ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod map;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
