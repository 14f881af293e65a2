//! Headless Aurora driver
//!
//! Builds a world from configuration, populates it and runs a scripted
//! play session at a fixed time step, logging what happened.
//!
//! ```text
//! aurora [simulation.toml|simulation.ron] [blueprints.ron|blueprints.toml]
//! ```

mod scenario;
mod script;

use std::path::PathBuf;

use aurora_engine::foundation::logging;
use aurora_engine::prelude::*;
use thiserror::Error;

use crate::scenario::Scenario;
use crate::script::Script;

/// Fatal driver errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// World setup failed
    #[error("World error: {0}")]
    World(#[from] WorldError),
}

fn load_config(path: Option<PathBuf>) -> Result<SimulationConfig, GameError> {
    let Some(path) = path else {
        log::info!("No configuration file given, using defaults");
        return Ok(SimulationConfig::default());
    };
    Ok(SimulationConfig::load_from_file(path)?)
}

fn load_blueprints(path: Option<PathBuf>) -> Result<BlueprintSet, GameError> {
    let Some(path) = path else {
        return Ok(BlueprintSet::builtin());
    };
    Ok(BlueprintSet::load_from_file(path)?)
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config = load_config(args.next())?;
    let blueprints = load_blueprints(args.next())?;

    let dt = config.fixed_timestep;
    let mut world = World::from_config(config, blueprints)?;
    let scenario = Scenario::populate(&mut world)?;

    let script = Script::demo();
    let mut renderer = DebugDrawList::new();
    let mut input = KeyboardState::new();
    let ticks = (script.duration() / dt).ceil() as u64;

    log::info!("Running {ticks} ticks of {:.4}s", dt);
    let stopwatch = Stopwatch::start_new();
    let mut contacts = 0;
    let mut destroyed = 0;

    for tick in 0..ticks {
        let t = tick as f32 * dt;
        script.apply(t, &mut input);

        let report = world.tick(&input, &mut renderer, dt);
        contacts += report.contacts;
        destroyed += report.destroyed;

        if report.destroyed > 0 {
            log::debug!("t = {t:.2}s: {} object(s) destroyed", report.destroyed);
        }
        if world.frame() % 60 == 0 {
            log::debug!(
                "frame {}: {} objects, {} draw calls",
                world.frame(),
                world.len(),
                renderer.len()
            );
        }
    }

    log::info!(
        "Simulated {:.1}s in {:.1} ms: {} contacts, {} objects destroyed",
        ticks as f32 * dt,
        stopwatch.elapsed_millis(),
        contacts,
        destroyed
    );
    scenario.log_summary(&world);
    Ok(())
}

fn main() {
    logging::init("info");
    log::info!("Starting Aurora");

    if let Err(e) = run() {
        log::error!("Fatal: {e}");
        std::process::exit(1);
    }
}
