//! Configuration system for Quickscape.
//!
//! Provides the generation settings (style, world size, time of day, feature
//! toggles) that persist to disk as RON files. Supports CLI overrides via clap,
//! hot-reload detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod environment;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, TerrainConfig, default_config_dir};
pub use environment::{EnvironmentStyle, TimeOfDay, WorldSize};
pub use error::ConfigError;
