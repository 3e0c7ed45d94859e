//! Shared enumerations.

use serde::{Deserialize, Serialize};

/// Grid cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    Floor = 0,
    Wall = 1,
}

impl Cell {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Floor),
            1 => Some(Cell::Wall),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Input identifiers the core understands. The host maps physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Sprint,
    Shoot,
}

/// Who asked for a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireSource {
    /// The shoot key.
    #[default]
    Keyboard,
    /// A click or tap forwarded by the UI layer.
    Pointer,
}

/// Why a projectile was retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOutcome {
    HitWall,
    HitCreature,
    Expired,
}

/// What a visual handle draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Wall,
    CreatureBody,
    CreatureEye,
    Projectile,
}
