//! The three user-facing choices that drive a generation run.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Visual theme of the generated world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum EnvironmentStyle {
    /// Green hills with lush trees.
    #[default]
    Forest,
    /// Low dunes and sparse olive vegetation.
    Desert,
    /// Tall snowy peaks.
    Snow,
    /// Flat beaches and bright foliage.
    Tropical,
    /// Dark, rugged terrain with lava-colored water.
    Volcanic,
}

impl EnvironmentStyle {
    /// Every style, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Forest,
        Self::Desert,
        Self::Snow,
        Self::Tropical,
        Self::Volcanic,
    ];

    /// Short human-readable blurb shown next to the style picker.
    pub fn description(self) -> &'static str {
        match self {
            Self::Forest => "Green hills, lush trees, rivers",
            Self::Desert => "Sandy dunes, cacti, oases",
            Self::Snow => "Snowy peaks, pine trees, frozen lakes",
            Self::Tropical => "Beaches, palm trees, ocean",
            Self::Volcanic => "Dark terrain, lava pools, rocks",
        }
    }
}

impl fmt::Display for EnvironmentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forest => "Forest",
            Self::Desert => "Desert",
            Self::Snow => "Snow",
            Self::Tropical => "Tropical",
            Self::Volcanic => "Volcanic",
        };
        f.write_str(name)
    }
}

/// Side length of the square world, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum WorldSize {
    /// 250 units.
    Small,
    /// 500 units.
    #[default]
    Medium,
    /// 1000 units.
    Large,
    /// 2000 units.
    Huge,
}

impl WorldSize {
    /// Every size, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Huge];

    /// Side length in world units.
    pub fn units(self) -> u32 {
        match self {
            Self::Small => 250,
            Self::Medium => 500,
            Self::Large => 1000,
            Self::Huge => 2000,
        }
    }
}

/// Sun position preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TimeOfDay {
    /// Low, warm sun.
    Dawn,
    /// High, near-white sun.
    #[default]
    Noon,
    /// Low, orange sun.
    Sunset,
    /// Sun below the horizon, dim blue moonlight.
    Night,
}

impl TimeOfDay {
    /// Every preset, in chronological order.
    pub const ALL: [Self; 4] = [Self::Dawn, Self::Noon, Self::Sunset, Self::Night];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_units() {
        assert_eq!(WorldSize::Small.units(), 250);
        assert_eq!(WorldSize::Medium.units(), 500);
        assert_eq!(WorldSize::Large.units(), 1000);
        assert_eq!(WorldSize::Huge.units(), 2000);
    }

    #[test]
    fn test_every_style_has_description() {
        for style in EnvironmentStyle::ALL {
            assert!(
                !style.description().is_empty(),
                "{style} should have a description"
            );
        }
    }

    #[test]
    fn test_style_display_matches_variant_name() {
        assert_eq!(EnvironmentStyle::Desert.to_string(), "Desert");
        assert_eq!(EnvironmentStyle::Volcanic.to_string(), "Volcanic");
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        assert_eq!(EnvironmentStyle::default(), EnvironmentStyle::Forest);
        assert_eq!(WorldSize::default(), WorldSize::Medium);
        assert_eq!(TimeOfDay::default(), TimeOfDay::Noon);
    }

    #[test]
    fn test_value_enum_parses_lowercase() {
        let style = EnvironmentStyle::from_str("volcanic", true).unwrap();
        assert_eq!(style, EnvironmentStyle::Volcanic);
        let time = TimeOfDay::from_str("sunset", true).unwrap();
        assert_eq!(time, TimeOfDay::Sunset);
    }
}
