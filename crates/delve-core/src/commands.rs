//! Commands and input events sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Input events
//! mutate the held-input state between ticks and are read as a snapshot at
//! the start of each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::map::GridMap;

/// All actions the host can request of the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Map lifecycle ---
    /// Replace the current level with the given map.
    LoadMap { map: GridMap },
    /// Replace the current level with a freshly generated dungeon.
    RegenerateMap { width: usize, height: usize },
    /// Tear the current level down and go idle.
    UnloadMap,

    // --- Combat ---
    /// Fire one projectile from the player's camera.
    Fire { source: FireSource },
}

/// Raw input forwarded by the host's event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Relative pointer motion; only meaningful while the pointer is captured.
    PointerDelta { dx: f32, dy: f32 },
    /// Pointer capture was acquired or released.
    PointerCapture { captured: bool },
    /// The inventory/menu overlay was shown or hidden.
    MenuVisible { visible: bool },
}
