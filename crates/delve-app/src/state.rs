//! State shared between the host's main thread and the game loop thread.

use std::sync::{Arc, Mutex};

use delve_core::commands::{InputEvent, PlayerCommand};
use delve_core::state::FrameSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug, Clone)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// An input event applied between ticks.
    Input(InputEvent),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Host state shared with the game loop thread.
///
/// `Arc<Mutex<...>>` for the latest snapshot, `Option` because nothing exists
/// before the first tick.
#[derive(Default)]
pub struct AppState {
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| (*lock).clone())
    }
}
