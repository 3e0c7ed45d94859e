//! Floating animation and eye-glow pulse. Cosmetic only, never gates logic.

use delve_core::constants::{CREATURE_BASE_HEIGHT, CREATURE_BOB_AMPLITUDE};

/// Per-frame cosmetic state of one creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Height of the creature's center above the floor.
    pub vertical_offset: f32,
    /// Eye glow intensity in `[0, 1]`.
    pub glow: f32,
}

/// Animation at `time_secs` for the creature with the given pool index.
/// The index offsets the phase so creatures do not bob in unison.
pub fn animate(time_secs: f64, index: u32) -> Animation {
    let phase = time_secs + index as f64;
    Animation {
        vertical_offset: CREATURE_BASE_HEIGHT + (phase.sin() as f32) * CREATURE_BOB_AMPLITUDE,
        glow: 0.5 + 0.5 * ((2.0 * time_secs + index as f64).sin() as f32),
    }
}
