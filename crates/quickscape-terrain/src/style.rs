//! Per-style generation constants.
//!
//! Every [`EnvironmentStyle`] maps to one [`StyleProfile`]; there is no
//! fallthrough, so adding a style without a profile fails to compile.

use glam::Vec4;
use quickscape_config::EnvironmentStyle;

/// Noise, water, and color parameters for one environment style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleProfile {
    /// Noise frequency per heightmap cell. Lower values give broader hills.
    pub frequency: f64,
    /// Maximum normalized terrain height, in `[0.0, 1.0]`.
    pub amplitude: f64,
    /// World-space height of the water plane.
    pub water_level: f64,
    /// Linear RGBA color of the water plane (alpha < 1 for translucency).
    pub water_color: Vec4,
    /// Linear RGBA color of tree foliage.
    pub leaf_color: Vec4,
    /// Linear RGBA color of scattered rocks.
    pub prop_color: Vec4,
}

/// Fixed trunk color shared by every style.
pub const TRUNK_COLOR: Vec4 = Vec4::new(0.4, 0.25, 0.15, 1.0);

const DEFAULT_WATER_COLOR: Vec4 = Vec4::new(0.2, 0.5, 0.7, 0.8);
const DEFAULT_PROP_COLOR: Vec4 = Vec4::new(0.4, 0.4, 0.4, 1.0);

const FOREST: StyleProfile = StyleProfile {
    frequency: 0.01,
    amplitude: 0.25,
    water_level: 10.0,
    water_color: DEFAULT_WATER_COLOR,
    leaf_color: Vec4::new(0.2, 0.5, 0.2, 1.0),
    prop_color: DEFAULT_PROP_COLOR,
};

const DESERT: StyleProfile = StyleProfile {
    frequency: 0.008,
    amplitude: 0.15,
    water_level: 2.0,
    water_color: DEFAULT_WATER_COLOR,
    leaf_color: Vec4::new(0.4, 0.5, 0.2, 1.0),
    prop_color: Vec4::new(0.8, 0.7, 0.5, 1.0),
};

const SNOW: StyleProfile = StyleProfile {
    frequency: 0.015,
    amplitude: 0.5,
    water_level: 8.0,
    water_color: Vec4::new(0.7, 0.85, 0.95, 0.7),
    leaf_color: Vec4::new(0.15, 0.3, 0.15, 1.0),
    prop_color: Vec4::new(0.9, 0.9, 0.95, 1.0),
};

const TROPICAL: StyleProfile = StyleProfile {
    frequency: 0.01,
    amplitude: 0.1,
    water_level: 10.0,
    water_color: Vec4::new(0.1, 0.6, 0.8, 0.8),
    leaf_color: Vec4::new(0.1, 0.5, 0.1, 1.0),
    prop_color: DEFAULT_PROP_COLOR,
};

const VOLCANIC: StyleProfile = StyleProfile {
    frequency: 0.02,
    amplitude: 0.4,
    water_level: 5.0,
    water_color: Vec4::new(0.8, 0.2, 0.1, 0.9),
    leaf_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
    prop_color: Vec4::new(0.2, 0.15, 0.15, 1.0),
};

impl StyleProfile {
    /// Look up the profile for a style.
    pub const fn for_style(style: EnvironmentStyle) -> Self {
        match style {
            EnvironmentStyle::Forest => FOREST,
            EnvironmentStyle::Desert => DESERT,
            EnvironmentStyle::Snow => SNOW,
            EnvironmentStyle::Tropical => TROPICAL,
            EnvironmentStyle::Volcanic => VOLCANIC,
        }
    }
}
