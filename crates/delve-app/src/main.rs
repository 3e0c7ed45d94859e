use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;

use delve_app::error::AppError;
use delve_app::game_loop::{demo_script, spawn_game_loop, LoopOptions, ScriptedInput};
use delve_app::state::{AppState, GameLoopCommand};
use delve_app::{loader, logging};
use delve_core::commands::PlayerCommand;
use delve_core::constants::MIN_GENERATED_EDGE;
use delve_core::error::MapError;
use delve_sim::SimConfig;

/// Default dungeon size when neither a map nor a size is given.
const DEFAULT_DUNGEON: (usize, usize) = (40, 30);

/// Headless first-person dungeon crawler simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file: JSON array of rows of 0 (floor) and 1 (wall)
    #[arg(short, long, conflicts_with = "generate")]
    map: Option<PathBuf>,

    /// Generate a dungeon of WIDTHxHEIGHT cells instead of loading a map
    #[arg(short, long)]
    generate: Option<String>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Simulation config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run as fast as possible instead of at the tick rate
    #[arg(long)]
    unpaced: bool,

    /// Print the final frame snapshot as JSON
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let setup = level_command(&args)?;
    let mut script = vec![ScriptedInput {
        frame: 0,
        command: GameLoopCommand::PlayerCommand(setup),
    }];
    script.extend(demo_script(args.frames));

    info!(
        "Starting simulation: seed {}, {} frames",
        config.seed, args.frames
    );
    let state = AppState::new();
    let options = LoopOptions {
        config,
        frame_limit: Some(args.frames),
        paced: !args.unpaced,
        script,
    };
    // Held until the loop finishes; dropping it disconnects the loop.
    let (_commands, handle) = spawn_game_loop(options, Arc::clone(&state.latest_snapshot))?;

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    info!(
        "Simulated {} frames: {} shots fired, {} creatures destroyed",
        summary.frames, summary.shots, summary.kills
    );

    if args.dump {
        if let Some(snapshot) = state.snapshot() {
            let json =
                serde_json::to_string_pretty(&snapshot).context("serializing final snapshot")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// The command that installs the first level.
fn level_command(args: &Args) -> Result<PlayerCommand, AppError> {
    if let Some(path) = &args.map {
        let map = loader::load_map(path)?;
        info!("Loaded map {} ({}x{})", path.display(), map.width(), map.height());
        return Ok(PlayerCommand::LoadMap { map });
    }

    let (width, height) = match &args.generate {
        Some(size) => loader::parse_size(size)?,
        None => DEFAULT_DUNGEON,
    };
    if width < MIN_GENERATED_EDGE || height < MIN_GENERATED_EDGE {
        return Err(MapError::TooSmall {
            width,
            height,
            min: MIN_GENERATED_EDGE,
        }
        .into());
    }
    Ok(PlayerCommand::RegenerateMap { width, height })
}
