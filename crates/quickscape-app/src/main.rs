//! Quickscape command-line front end.
//!
//! Loads `config.ron`, applies CLI overrides, and runs one generation against
//! the in-memory host, logging what was built.
//!
//! Run with: `cargo run -p quickscape-app -- --style snow --size large --seed 7`

use std::path::{Path, PathBuf};

use clap::Parser;
use quickscape_config::{CliArgs, Config, ConfigError, default_config_dir};
use quickscape_scene::{GenerationReport, InMemoryScene, SceneError, SceneGenerator};
use quickscape_terrain::{entropy_seed, generation_rng};
use tracing::{error, info, warn};

/// Debug-build JSON logs go here, under the config directory.
const LOG_DIR_NAME: &str = "logs";

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().or_else(default_config_dir);

    // Bring logging up first with the CLI level; the file's level follows below.
    let mut bootstrap = Config::default();
    bootstrap.apply_cli_overrides(&args);
    let log_dir = log_dir(config_dir.as_deref());
    let logging = match quickscape_log::init_logging(
        log_dir.as_deref(),
        cfg!(debug_assertions),
        Some(&bootstrap),
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    let config = match load_config(config_dir.as_deref(), &args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Some(handle) = &logging
        && let Err(e) = handle.apply_config(&config)
    {
        warn!("Could not apply configured log level: {e}");
    }

    let seed = config.generation.seed.unwrap_or_else(entropy_seed);
    info!(seed, "Quickscape");
    info!(
        "Style: {} ({}) | Size: {:?} | Time: {:?}",
        config.generation.style,
        config.generation.style.description(),
        config.generation.world_size,
        config.generation.time_of_day,
    );

    let mut scene = InMemoryScene::new();
    match generate(&config, seed, &mut scene) {
        Ok(report) => log_report(&report, &scene),
        Err(e) => {
            error!("Generation failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Where debug-build logs are written, next to `config.ron`.
fn log_dir(config_dir: Option<&Path>) -> Option<PathBuf> {
    config_dir.map(|dir| dir.join(LOG_DIR_NAME))
}

/// Load config from `config_dir`, or defaults when there is none, then apply
/// CLI overrides.
fn load_config(config_dir: Option<&Path>, args: &CliArgs) -> Result<Config, ConfigError> {
    let mut config = match config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => {
            warn!("No config directory available, using defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(args);
    Ok(config)
}

fn generate(
    config: &Config,
    seed: u64,
    scene: &mut InMemoryScene,
) -> Result<GenerationReport, SceneError> {
    let mut rng = generation_rng(seed);
    SceneGenerator::from_config(config).generate(scene, &mut rng)
}

fn log_report(report: &GenerationReport, scene: &InMemoryScene) {
    info!(
        "Terrain: seed offset {:.3}, normalized heights {:.3}..{:.3}",
        report.terrain_seed.value(),
        report.height_range.0,
        report.height_range.1,
    );
    match &report.water {
        Some(water) => info!(
            "Water: level {:.1}, extent {:.0}",
            water.level(),
            water.extent()
        ),
        None => info!("Water: none"),
    }
    info!(
        "Trees: {} of {} attempts | Rocks: {}",
        report.trees.len(),
        report.tree_attempts,
        report.rocks.len(),
    );
    info!(
        "Sun: elevation {:.0} deg, azimuth {:.0} deg, intensity {:.2}",
        report.lighting.elevation_deg, report.lighting.azimuth_deg, report.lighting.intensity,
    );
    for stage in &report.skipped {
        warn!("Skipped: {}", stage.label());
    }
    info!("Scene objects: {}", scene.len());
}
