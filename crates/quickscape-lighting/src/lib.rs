//! Sun lighting presets for each time of day.

mod directional;

pub use directional::{LightingSetting, SUN_AZIMUTH_DEG, compute_lighting};
