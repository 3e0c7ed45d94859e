//! Simulation core for DELVE.
//!
//! Owns the hecs ECS world, runs the frame pipeline at a fixed tick rate
//! and produces FrameSnapshots for the host.

pub mod cleanup_queue;
pub mod collision;
pub mod engine;
pub mod input;
pub mod render;
pub mod sink;
pub mod systems;
pub mod world_setup;

pub use delve_core as core;
pub use engine::{CommandSender, SimConfig, SimulationEngine};
