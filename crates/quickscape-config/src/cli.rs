//! Command-line argument parsing for Quickscape.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::environment::{EnvironmentStyle, TimeOfDay, WorldSize};

/// Quickscape command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "quickscape", about = "One-click procedural scene generator")]
pub struct CliArgs {
    /// Environment style.
    #[arg(long, value_enum)]
    pub style: Option<EnvironmentStyle>,

    /// World size preset.
    #[arg(long, value_enum)]
    pub size: Option<WorldSize>,

    /// Time-of-day lighting preset.
    #[arg(long, value_enum)]
    pub time_of_day: Option<TimeOfDay>,

    /// Skip the water plane.
    #[arg(long)]
    pub no_water: bool,

    /// Skip tree scattering.
    #[arg(long)]
    pub no_trees: bool,

    /// Skip rock scattering.
    #[arg(long)]
    pub no_props: bool,

    /// Fixed RNG seed for a reproducible world.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(style) = args.style {
            self.generation.style = style;
        }
        if let Some(size) = args.size {
            self.generation.world_size = size;
        }
        if let Some(time) = args.time_of_day {
            self.generation.time_of_day = time;
        }
        if args.no_water {
            self.generation.water = false;
        }
        if args.no_trees {
            self.generation.trees = false;
        }
        if args.no_props {
            self.generation.props = false;
        }
        if let Some(seed) = args.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
