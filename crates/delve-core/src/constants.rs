//! Simulation constants and tuning parameters.
//!
//! Distances are world units, speeds are world units per frame.

/// Frame rate the simulation is tuned for (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World geometry ---

/// Edge length of one grid cell.
pub const CELL_SIZE: f32 = 2.0;

/// Height of a wall block.
pub const WALL_HEIGHT: f32 = 3.0;

// --- Player ---

/// Camera height above the floor when standing still.
pub const BASE_EYE_HEIGHT: f32 = 1.6;

/// Half width (x and z) of the player's validation box.
pub const PLAYER_HALF_WIDTH: f32 = 0.3;

/// Forward/back/strafe speed.
pub const PLAYER_MOVE_SPEED: f32 = 0.04;

/// Speed multiplier while sprinting.
pub const SPRINT_MULTIPLIER: f32 = 2.0;

/// Keyboard turn step (radians per frame) while the pointer is free.
pub const TURN_STEP: f32 = 0.05;

/// Radians of look per pointer unit while the pointer is captured.
pub const POINTER_SENSITIVITY: f32 = 0.002;

/// Pitch limit (radians) in either direction.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_3;

// --- Head bob ---

/// Phase advance per moving frame.
pub const HEAD_BOB_STEP: f32 = 0.15;

/// Phase advance multiplier while sprinting.
pub const HEAD_BOB_SPRINT_FACTOR: f32 = 1.5;

/// Vertical amplitude of the bob.
pub const HEAD_BOB_AMPLITUDE: f32 = 0.05;

/// Per-frame decay of the bob offset toward the base eye height when stationary.
pub const HEAD_BOB_DECAY: f32 = 0.9;

// --- Creatures ---

/// Pursuit speed.
pub const CREATURE_MOVE_SPEED: f32 = 0.02;

/// Distance to the player below which a creature holds position.
pub const CREATURE_DEAD_ZONE: f32 = 1.5;

/// Resting height of a creature's center above the floor.
pub const CREATURE_BASE_HEIGHT: f32 = 1.0;

/// Vertical amplitude of the floating animation.
pub const CREATURE_BOB_AMPLITUDE: f32 = 0.1;

/// Half extents (x, y, z) of a creature's bounding box.
pub const CREATURE_HALF_EXTENTS: [f32; 3] = [0.4, 0.5, 0.4];

/// One creature is spawned per this many open cells...
pub const CELLS_PER_CREATURE: usize = 10;

/// ...but never fewer than this...
pub const MIN_CREATURES: usize = 3;

/// ...nor more than this.
pub const MAX_CREATURES: usize = 5;

/// Visual handles owned by one creature (body + two eyes).
pub const CREATURE_VISUAL_PARTS: usize = 3;

// --- Projectiles ---

/// Projectile speed.
pub const PROJECTILE_SPEED: f32 = 0.8;

/// Frames a projectile lives without hitting anything.
pub const PROJECTILE_LIFETIME: u32 = 100;

/// Spawn height below the camera.
pub const PROJECTILE_DROP: f32 = 0.2;

/// Half extent of a projectile's bounding box (cube).
pub const PROJECTILE_HALF_EXTENT: f32 = 0.1;

// --- Cleanup ---

/// Maximum number of cleanup entries released per frame.
pub const CLEANUP_DRAIN_PER_FRAME: usize = 2;

// --- Dungeon generation ---

/// Smallest generated map edge (cells).
pub const MIN_GENERATED_EDGE: usize = 5;
