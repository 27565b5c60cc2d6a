//! Directional sun light derived from a [`TimeOfDay`] preset.
//!
//! The preset fixes elevation, color, and intensity; azimuth never changes.
//! [`LightingSetting::rotation`] turns the two angles into the orientation a
//! host applies to its sun object.

use glam::{EulerRot, Quat, Vec3};
use quickscape_config::TimeOfDay;

/// Horizontal angle of the sun in degrees, shared by every preset.
pub const SUN_AZIMUTH_DEG: f32 = -30.0;

/// CPU-side description of the scene's directional light.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingSetting {
    /// Angle above the horizon in degrees. Negative values put the sun below it.
    pub elevation_deg: f32,
    /// Horizontal angle in degrees.
    pub azimuth_deg: f32,
    /// Linear RGB color of the light (not premultiplied by intensity).
    pub color: Vec3,
    /// Scalar intensity multiplier.
    pub intensity: f32,
    /// Cast filtered, soft-edged shadows. Every preset does.
    pub soft_shadows: bool,
}

impl LightingSetting {
    /// Orientation of the light: pitch by elevation, then yaw by azimuth.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.azimuth_deg.to_radians(),
            self.elevation_deg.to_radians(),
            0.0,
        )
    }

    /// Normalized direction the light travels in (the rotated +Z axis).
    pub fn direction(&self) -> Vec3 {
        (self.rotation() * Vec3::Z).normalize()
    }
}

/// Lighting preset for a time of day. Pure lookup.
pub fn compute_lighting(time_of_day: TimeOfDay) -> LightingSetting {
    let (elevation_deg, color, intensity) = match time_of_day {
        TimeOfDay::Dawn => (5.0, Vec3::new(1.0, 0.7, 0.5), 0.6),
        TimeOfDay::Noon => (50.0, Vec3::new(1.0, 0.95, 0.9), 1.2),
        TimeOfDay::Sunset => (10.0, Vec3::new(1.0, 0.5, 0.3), 0.7),
        TimeOfDay::Night => (-30.0, Vec3::new(0.3, 0.3, 0.5), 0.15),
    };

    LightingSetting {
        elevation_deg,
        azimuth_deg: SUN_AZIMUTH_DEG,
        color,
        intensity,
        soft_shadows: true,
    }
}
