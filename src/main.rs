//! Box Blaster entry point
//!
//! Runs the simulation headless at a fixed frame rate with the autopilot
//! doing the aiming. The windowed front end drives the same `tick`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use box_blaster::renderer::snapshot;
use box_blaster::settings::Settings;
use box_blaster::sim::{ResetReason, SceneLayout, SimEvent, SimulationState, TickInput, tick};

/// Headless Box Blaster run
#[derive(Debug, Parser)]
#[command(name = "box-blaster", version, about)]
struct Cli {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Autopilot RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Settings JSON file (defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Scene layout JSON file (reference level when omitted)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Stop as soon as every box is destroyed
    #[arg(long)]
    stop_when_cleared: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    shots: u32,
    hits: u32,
    misses: u32,
}

fn run(cli: &Cli) -> Result<RunStats, Box<dyn std::error::Error>> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let layout = match &cli.layout {
        Some(path) => SceneLayout::load(path)?,
        None => SceneLayout::reference(),
    };

    let dt = settings.frame_dt;
    let mut state = SimulationState::from_layout(&layout, settings, cli.seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut stats = RunStats::default();

    for frame in 0..cli.frames {
        let now = frame as f32 * dt;
        tick(&mut state, &input, now);

        for event in state.take_events() {
            match event {
                SimEvent::Launched { .. } => stats.shots += 1,
                SimEvent::ObstacleDestroyed { name, .. } => {
                    log::info!("Frame {}: {} destroyed", state.frame, name);
                }
                SimEvent::ProjectileReset {
                    reason: ResetReason::Hit,
                    ..
                } => stats.hits += 1,
                SimEvent::ProjectileReset {
                    reason: ResetReason::OutOfBounds,
                    last_position,
                } => {
                    log::debug!("Frame {}: miss, left bounds at {:?}", state.frame, last_position);
                    stats.misses += 1;
                }
            }
        }

        // Stand-in for the draw call
        let instances = snapshot(&state);
        log::trace!("Frame {}: {} instances", state.frame, instances.len());

        if cli.stop_when_cleared && state.is_cleared() {
            log::info!("All targets cleared at frame {} (t={:.2}s)", state.frame, state.now);
            break;
        }
    }

    log::info!(
        "{} entities left ({} targets), {} meshes loaded",
        state.scene.len(),
        state.scene.destructible_count(),
        state.meshes.len()
    );
    Ok(stats)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Box Blaster (headless) starting, {} frames, seed {}", cli.frames, cli.seed);

    match run(&cli) {
        Ok(stats) => {
            println!(
                "shots: {}  hits: {}  misses: {}",
                stats.shots, stats.hits, stats.misses
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
