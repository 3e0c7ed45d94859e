//! DELVE headless host.
//!
//! Wires the simulation crates to a command line: reads maps and config,
//! runs the engine on its own paced thread and reports what happened.

pub mod error;
pub mod game_loop;
pub mod loader;
pub mod logging;
pub mod state;

pub use delve_core as core;
