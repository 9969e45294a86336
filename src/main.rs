//! Bullet World entry point
//!
//! Headless host driver: feeds the simulation 60 Hz timestamps and a scripted
//! input pattern, logs progress once per simulated second, and prints the
//! final frame snapshot as JSON.
//!
//! Usage: `bullet-world [config.json] [seconds]`

use std::process::ExitCode;

use bullet_world::SimConfig;
use bullet_world::sim::{Direction, HeldDirections, Simulation, TickInput};

const FRAME_RATE: f64 = 60.0;
const DEFAULT_SECONDS: f64 = 12.0;

/// Walk a square: one second per side
fn scripted_input(time: f64) -> TickInput {
    let side = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    let direction = side[(time as usize) % side.len()];
    let held: HeldDirections = [direction].into_iter().collect();
    held.into()
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bullet World (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<f64>()) {
        Some(Ok(seconds)) if seconds > 0.0 => seconds,
        Some(_) => {
            log::error!("Duration must be a positive number of seconds");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_SECONDS,
    };

    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let frames = (seconds * FRAME_RATE).round() as u64;
    let mut spawned = 0;
    let mut expired = 0;
    for i in 0..=frames {
        let timestamp = i as f64 / FRAME_RATE;
        let report = sim.frame(timestamp, &scripted_input(timestamp));
        spawned += report.spawned;
        expired += report.expired + report.culled;

        if i > 0 && i % FRAME_RATE as u64 == 0 {
            let player = sim.player.pos();
            log::info!(
                "t={:.0}s bullets={} spawned={} expired={} player=({:.1}, {:.1})",
                sim.time(),
                sim.bullet_count(),
                spawned,
                expired,
                player.x,
                player.y
            );
        }
    }

    if sim.is_settled() {
        log::info!("All spawners finished and every bullet expired");
    }

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
