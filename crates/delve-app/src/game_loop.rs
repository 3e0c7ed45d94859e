//! Game loop thread — runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling, and a scripted input track can drive the player.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use delve_core::commands::InputEvent;
use delve_core::constants::TICK_RATE;
use delve_core::enums::Key;
use delve_core::events::FrameEvent;
use delve_core::state::FrameSnapshot;
use delve_core::types::{CreaturePosition, PlayerPose};
use delve_sim::sink::FrameSink;
use delve_sim::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// A command applied right before the given frame runs.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    pub frame: u64,
    pub command: GameLoopCommand,
}

impl ScriptedInput {
    fn input(frame: u64, event: InputEvent) -> Self {
        Self {
            frame,
            command: GameLoopCommand::Input(event),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub config: SimConfig,
    /// Stop after this many frames; `None` runs until shutdown.
    pub frame_limit: Option<u64>,
    /// Sleep between ticks to hold the tick rate. Off runs as fast as possible.
    pub paced: bool,
    /// Sorted by frame.
    pub script: Vec<ScriptedInput>,
}

/// What a finished loop reports back.
#[derive(Debug, Clone, Default)]
pub struct LoopSummary {
    pub frames: u64,
    pub shots: usize,
    pub kills: usize,
    pub final_snapshot: Option<FrameSnapshot>,
}

/// Walk forward, turn now and then, fire every 45 frames, sprint for a while.
pub fn demo_script(frames: u64) -> Vec<ScriptedInput> {
    let mut script = vec![ScriptedInput::input(0, InputEvent::KeyDown { key: Key::Forward })];
    for start in (90..frames).step_by(180) {
        script.push(ScriptedInput::input(start, InputEvent::KeyDown { key: Key::TurnLeft }));
        script.push(ScriptedInput::input(start + 20, InputEvent::KeyUp { key: Key::TurnLeft }));
    }
    for frame in (30..frames).step_by(45) {
        script.push(ScriptedInput::input(frame, InputEvent::KeyDown { key: Key::Shoot }));
        script.push(ScriptedInput::input(frame + 1, InputEvent::KeyUp { key: Key::Shoot }));
    }
    script.push(ScriptedInput::input(frames / 2, InputEvent::KeyDown { key: Key::Sprint }));
    script.push(ScriptedInput::input(frames * 3 / 4, InputEvent::KeyUp { key: Key::Sprint }));
    script.sort_by_key(|s| s.frame);
    script
}

/// Logs the pose and creature list about once per second.
#[derive(Debug, Default)]
pub struct LogSink {
    poses: u64,
}

impl FrameSink for LogSink {
    fn emit_pose(&mut self, pose: &PlayerPose) {
        self.poses += 1;
        if self.poses % TICK_RATE as u64 == 0 {
            debug!(
                "Player at ({:.2}, {:.2}) facing {:.2} rad",
                pose.x, pose.z, pose.angle
            );
        }
    }

    fn emit_creatures(&mut self, creatures: &[CreaturePosition]) {
        if self.poses % TICK_RATE as u64 == 0 {
            for creature in creatures {
                debug!(
                    "  creature {} at ({:.2}, {:.2})",
                    creature.index, creature.x, creature.z
                );
            }
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host to use and the handle yielding the summary.
pub fn spawn_game_loop(
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("delve-game-loop".into())
        .spawn(move || run_game_loop(options, cmd_rx, &latest_snapshot))
        .map_err(AppError::Spawn)?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or the frame limit.
fn run_game_loop(
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) -> LoopSummary {
    let mut engine = SimulationEngine::new(options.config);
    engine.add_sink(Box::new(LogSink::default()));

    let mut summary = LoopSummary::default();
    let mut script = options.script.into_iter().peekable();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Shutdown) => return summary,
                Ok(command) => apply(&mut engine, command),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Scripted input due this frame
        while let Some(entry) = script.next_if(|s| s.frame <= summary.frames) {
            if matches!(entry.command, GameLoopCommand::Shutdown) {
                return summary;
            }
            apply(&mut engine, entry.command);
        }

        // 3. Advance one tick
        let snapshot = engine.tick();
        summary.frames += 1;
        tally(&mut summary, &snapshot);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        summary.final_snapshot = Some(snapshot);

        if options.frame_limit.is_some_and(|limit| summary.frames >= limit) {
            info!("Frame limit reached after {} frames", summary.frames);
            return summary;
        }

        // 5. Sleep until next tick
        if options.paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset instead of catching up
                next_tick_time = now;
            }
        }
    }
}

fn apply(engine: &mut SimulationEngine, command: GameLoopCommand) {
    match command {
        GameLoopCommand::PlayerCommand(cmd) => engine.queue_command(cmd),
        GameLoopCommand::Input(event) => engine.handle_input(event),
        GameLoopCommand::Shutdown => {}
    }
}

fn tally(summary: &mut LoopSummary, snapshot: &FrameSnapshot) {
    for event in &snapshot.events {
        match event {
            FrameEvent::ProjectileFired { .. } => summary.shots += 1,
            FrameEvent::CreatureKilled { index, x, z } => {
                summary.kills += 1;
                info!("Creature {index} destroyed at ({x:.2}, {z:.2})");
            }
            _ => {}
        }
    }
}
