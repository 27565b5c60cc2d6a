//! Water plane placement.

use glam::{DVec3, Vec4};
use quickscape_config::EnvironmentStyle;

use crate::style::StyleProfile;

/// Width of the host plane primitive at scale 1.
pub const PLANE_PRIMITIVE_WIDTH: f64 = 10.0;

/// A flat translucent water plane centered over the world origin.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterPlacement {
    /// Plane center; always on the vertical axis through the origin.
    pub position: DVec3,
    /// Horizontal scale applied to the plane primitive on X and Z.
    pub horizontal_scale: f64,
    /// Linear RGBA color.
    pub color: Vec4,
}

impl WaterPlacement {
    /// Height of the water surface.
    pub fn level(&self) -> f64 {
        self.position.y
    }

    /// Side length of the plane in world units.
    pub fn extent(&self) -> f64 {
        self.horizontal_scale * PLANE_PRIMITIVE_WIDTH
    }
}

/// Water plane for a style and world size, or `None` when water is disabled.
pub fn compute_water_placement(
    style: EnvironmentStyle,
    world_size: f64,
    enabled: bool,
) -> Option<WaterPlacement> {
    if !enabled {
        return None;
    }

    let profile = StyleProfile::for_style(style);
    Some(WaterPlacement {
        position: DVec3::new(0.0, profile.water_level, 0.0),
        horizontal_scale: world_size / 8.0,
        color: profile.water_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_returns_none() {
        assert!(compute_water_placement(EnvironmentStyle::Forest, 500.0, false).is_none());
    }

    #[test]
    fn test_levels_per_style() {
        let cases = [
            (EnvironmentStyle::Forest, 10.0),
            (EnvironmentStyle::Desert, 2.0),
            (EnvironmentStyle::Snow, 8.0),
            (EnvironmentStyle::Tropical, 10.0),
            (EnvironmentStyle::Volcanic, 5.0),
        ];
        for (style, level) in cases {
            let water = compute_water_placement(style, 500.0, true).unwrap();
            assert_eq!(water.level(), level, "{style}");
            assert_eq!(water.position.x, 0.0);
            assert_eq!(water.position.z, 0.0);
        }
    }

    #[test]
    fn test_extent_scales_with_world_size() {
        let small = compute_water_placement(EnvironmentStyle::Snow, 250.0, true).unwrap();
        let huge = compute_water_placement(EnvironmentStyle::Snow, 2000.0, true).unwrap();
        assert_eq!(small.horizontal_scale, 31.25);
        assert_eq!(huge.extent(), 2500.0);
        assert!(huge.extent() > small.extent());
    }

    #[test]
    fn test_volcanic_water_is_lava_colored() {
        let water = compute_water_placement(EnvironmentStyle::Volcanic, 500.0, true).unwrap();
        assert_eq!(water.color, Vec4::new(0.8, 0.2, 0.1, 0.9));
    }
}
