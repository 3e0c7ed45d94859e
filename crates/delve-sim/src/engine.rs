//! Simulation engine — the frame scheduler at the root of the core.
//!
//! `SimulationEngine` owns the hecs ECS world, the loaded level, the player,
//! the cleanup queue and the render collection. Each `tick()` processes
//! queued commands, snapshots input and runs the fixed pipeline
//! Movement -> Projectiles -> Creature AI -> Cleanup -> Draw.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::mpsc;

use hecs::World;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use delve_core::commands::{InputEvent, PlayerCommand};
use delve_core::constants::*;
use delve_core::enums::FireSource;
use delve_core::events::FrameEvent;
use delve_core::map::GridMap;
use delve_core::state::FrameSnapshot;
use delve_core::types::{HeadBob, Player, SimTime};

use delve_procgen::{generate, DungeonParams};

use crate::cleanup_queue::CleanupQueue;
use crate::collision::CollisionIndex;
use crate::input::InputState;
use crate::render::{HeadlessRenderer, RenderBackend};
use crate::sink::FrameSink;
use crate::systems;
use crate::systems::creature_ai::LevelTerrain;
use crate::systems::snapshot::FrameFacts;
use crate::world_setup::{self, Level};

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same creature placement and dungeons.
    pub seed: u64,
    /// World units per grid cell.
    pub cell_size: f32,
    pub wall_height: f32,
    /// One creature per this many floor cells...
    pub cells_per_creature: usize,
    /// ...clamped to this range.
    pub min_creatures: usize,
    pub max_creatures: usize,
    /// Cleanup entries released per frame.
    pub cleanup_per_frame: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cell_size: CELL_SIZE,
            wall_height: WALL_HEIGHT,
            cells_per_creature: CELLS_PER_CREATURE,
            min_creatures: MIN_CREATURES,
            max_creatures: MAX_CREATURES,
            cleanup_per_frame: CLEANUP_DRAIN_PER_FRAME,
        }
    }
}

/// Cloneable handle the host uses to send commands, e.g. the UI's fire button.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<PlayerCommand>,
}

impl CommandSender {
    /// Queue a command for the next tick. Returns false once the engine is gone.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Fire on behalf of a click or tap.
    pub fn fire(&self) -> bool {
        self.send(PlayerCommand::Fire {
            source: FireSource::Pointer,
        })
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<R: RenderBackend = HeadlessRenderer> {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    level: Option<Level>,
    player: Player,
    head_bob: HeadBob,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    command_tx: mpsc::Sender<PlayerCommand>,
    command_rx: mpsc::Receiver<PlayerCommand>,
    pending_shots: Vec<FireSource>,
    cleanup: CleanupQueue,
    renderer: R,
    sinks: Vec<Box<dyn FrameSink>>,
    events: Vec<FrameEvent>,
    next_creature_index: u32,
}

impl SimulationEngine {
    /// Create a new engine drawing into an in-memory render collection.
    pub fn new(config: SimConfig) -> Self {
        Self::with_renderer(config, HeadlessRenderer::new())
    }
}

impl<R: RenderBackend> SimulationEngine<R> {
    /// Create a new engine with the given config and render backend.
    pub fn with_renderer(config: SimConfig, renderer: R) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            cleanup: CleanupQueue::new(config.cleanup_per_frame),
            config,
            level: None,
            player: Player::default(),
            head_bob: HeadBob::default(),
            input: InputState::new(),
            command_queue: VecDeque::new(),
            command_tx,
            command_rx,
            pending_shots: Vec::new(),
            renderer,
            sinks: Vec::new(),
            events: Vec::new(),
            next_creature_index: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Handle for collaborators outside the simulation (UI fire button, map loader).
    pub fn command_sender(&self) -> CommandSender {
        CommandSender {
            tx: self.command_tx.clone(),
        }
    }

    /// Apply an input event between ticks.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.apply(event) {
            self.queue_command(command);
        }
    }

    /// Register a sink for per-frame pose and creature positions.
    pub fn add_sink(&mut self, sink: Box<dyn FrameSink>) {
        self.sinks.push(sink);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.process_commands();
        self.run_systems();

        let facts = FrameFacts {
            time: self.time,
            map_loaded: self.level.is_some(),
            pending_cleanup: self.cleanup.len(),
            pointer_captured: self.input.pointer_captured(),
            menu_visible: self.input.menu_visible(),
        };
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, facts, &self.player, &self.head_bob, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn head_bob(&self) -> &HeadBob {
        &self.head_bob
    }

    /// The loaded map, if any.
    pub fn map(&self) -> Option<&GridMap> {
        self.level.as_ref().map(|level| &level.map)
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn collision(&self) -> Option<&CollisionIndex> {
        self.level.as_ref().map(|level| &level.collision)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Destroyed creatures whose visuals are still held.
    pub fn pending_cleanup(&self) -> usize {
        self.cleanup.len()
    }

    /// Spawn a creature at world `(x, z)` outside the regular batch (for tests).
    #[cfg(test)]
    pub fn spawn_test_creature(&mut self, x: f32, z: f32) -> hecs::Entity {
        world_setup::spawn_creature(
            &mut self.world,
            &mut self.renderer,
            glam::Vec2::new(x, z),
            &mut self.next_creature_index,
        )
    }

    /// Place the player directly (for tests).
    #[cfg(test)]
    pub fn set_test_player(&mut self, player: Player) {
        self.player = player;
    }

    /// Process all queued commands, local queue first, then the channel.
    fn process_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            self.command_queue.push_back(command);
        }
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::LoadMap { map } => {
                self.install_level(map);
            }
            PlayerCommand::RegenerateMap { width, height } => {
                match generate(&DungeonParams::new(width, height), &mut self.rng) {
                    Ok(map) => self.install_level(map),
                    Err(e) => warn!("Dungeon generation failed, keeping current level: {e}"),
                }
            }
            PlayerCommand::UnloadMap => {
                self.teardown_level();
                self.player = Player::default();
                self.head_bob = HeadBob::default();
            }
            PlayerCommand::Fire { source } => {
                if self.level.is_none() {
                    debug!("Fire ignored: no level loaded");
                } else if source == FireSource::Pointer && self.input.menu_visible() {
                    debug!("Pointer fire suppressed while the menu is open");
                } else {
                    self.pending_shots.push(source);
                }
            }
        }
    }

    /// Replace the current level: tear down, build, place player, spawn creatures.
    fn install_level(&mut self, map: GridMap) {
        self.teardown_level();

        let level = Level::build(map, &self.config, &mut self.world, &mut self.renderer);
        self.player = world_setup::spawn_player(&level);
        self.head_bob = HeadBob::default();
        let creatures = world_setup::spawn_creatures(
            &mut self.world,
            &level,
            &self.config,
            &mut self.rng,
            &mut self.renderer,
            &mut self.next_creature_index,
        );

        info!(
            "Loaded {}x{} map: {} walls, {} creatures",
            level.map.width(),
            level.map.height(),
            level.wall_count(),
            creatures
        );
        self.events.push(FrameEvent::MapLoaded {
            width: level.map.width(),
            height: level.map.height(),
            creatures,
        });
        self.level = Some(level);
    }

    fn teardown_level(&mut self) {
        self.pending_shots.clear();
        if let Some(level) = self.level.take() {
            world_setup::teardown(
                &mut self.world,
                level,
                &mut self.renderer,
                &mut self.cleanup,
                self.time.tick,
                &mut self.events,
            );
            debug!("Level torn down, {} creatures pending cleanup", self.cleanup.len());
        }
    }

    /// Run the frame pipeline in its fixed order.
    fn run_systems(&mut self) {
        let input = self.input.snapshot();

        let Some(level) = self.level.as_ref() else {
            // Idle without a level; a previous teardown may still be draining.
            systems::cleanup::run(
                &mut self.cleanup,
                &mut self.renderer,
                self.time.tick,
                &mut self.events,
            );
            return;
        };

        // 1. Movement
        systems::movement::run(
            &self.world,
            &level.collision,
            &input,
            &mut self.player,
            &mut self.head_bob,
        );
        let pose = self.player.pose();
        for sink in &mut self.sinks {
            sink.emit_pose(&pose);
        }

        // 2. Projectiles: spawn this frame's shots from the resolved pose, then advance all
        for source in self.pending_shots.drain(..) {
            systems::projectiles::spawn(
                &mut self.world,
                &mut self.renderer,
                &self.player,
                self.head_bob.eye_height,
                source,
                &mut self.events,
            );
        }
        systems::projectiles::run(
            &mut self.world,
            &level.collision,
            &mut self.renderer,
            &mut self.cleanup,
            self.time.tick,
            &mut self.events,
        );

        // 3. Creature AI
        let terrain = LevelTerrain {
            map: &level.map,
            transform: &level.transform,
            collision: &level.collision,
        };
        let positions = systems::creature_ai::run(
            &mut self.world,
            &terrain,
            self.player.position(),
            self.time.elapsed_secs,
        );
        for sink in &mut self.sinks {
            sink.emit_creatures(&positions);
        }

        // 4. Cleanup drain
        systems::cleanup::run(
            &mut self.cleanup,
            &mut self.renderer,
            self.time.tick,
            &mut self.events,
        );

        // 5. Draw
        systems::draw::run(
            &self.world,
            &mut self.renderer,
            &self.player,
            self.head_bob.eye_height,
        );
    }
}
