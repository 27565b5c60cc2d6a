//! Heightmap synthesis and terrain height sampling.
//!
//! The grid is filled with 2-D Perlin noise remapped to `[0, 1]` and scaled by
//! the style amplitude. It is centered on the world origin, so world `(x, z)`
//! in `[-size/2, size/2)` covers the whole grid.

use glam::DVec3;
use noise::{NoiseFn, Perlin};
use quickscape_config::EnvironmentStyle;

use crate::seed::TerrainSeed;
use crate::style::StyleProfile;

/// Heightmap samples per side unless configured otherwise.
pub const DEFAULT_RESOLUTION: usize = 513;

/// Largest accepted samples per side.
pub const MAX_RESOLUTION: usize = 4097;

/// World-space height that a normalized value of 1.0 maps to.
pub const DEFAULT_MAX_HEIGHT: f64 = 100.0;

/// Permutation seed of the Perlin field. Variation between runs comes from
/// [`TerrainSeed`], which shifts the sampling window instead.
const PERLIN_SEED: u32 = 0;

/// Errors raised for heightmap parameters that cannot describe a grid.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HeightmapError {
    /// Bilinear sampling needs at least a 2x2 grid, and the grid must fit in memory.
    #[error("heightmap resolution must be in 2..=4097, got {0}")]
    InvalidResolution(usize),
    /// World size must be a positive, finite length.
    #[error("world size must be positive and finite, got {0}")]
    InvalidWorldSize(f64),
    /// Max height must be a positive, finite length.
    #[error("max height must be positive and finite, got {0}")]
    InvalidMaxHeight(f64),
}

/// Inputs for one heightmap.
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// Style selecting noise frequency and amplitude.
    pub style: EnvironmentStyle,
    /// Side length of the terrain square in world units.
    pub world_size: f64,
    /// Samples per side.
    pub resolution: usize,
    /// World-space height for a normalized value of 1.0.
    pub max_height: f64,
    /// Noise-space offset for this run.
    pub seed: TerrainSeed,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            style: EnvironmentStyle::default(),
            world_size: 500.0,
            resolution: DEFAULT_RESOLUTION,
            max_height: DEFAULT_MAX_HEIGHT,
            seed: TerrainSeed(0.0),
        }
    }
}

/// Square, row-major grid of normalized terrain heights.
///
/// Rows run along world Z and columns along world X. Every value lies in
/// `[0, amplitude]`. The grid is never modified after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    resolution: usize,
    world_size: f64,
    max_height: f64,
    amplitude: f64,
    values: Vec<f64>,
}

impl Heightmap {
    /// Synthesize a heightmap.
    ///
    /// # Errors
    ///
    /// Returns a [`HeightmapError`] when the resolution, world size, or max
    /// height cannot describe a terrain.
    pub fn generate(params: &HeightmapParams) -> Result<Self, HeightmapError> {
        if !(2..=MAX_RESOLUTION).contains(&params.resolution) {
            return Err(HeightmapError::InvalidResolution(params.resolution));
        }
        if !(params.world_size.is_finite() && params.world_size > 0.0) {
            return Err(HeightmapError::InvalidWorldSize(params.world_size));
        }
        if !(params.max_height.is_finite() && params.max_height > 0.0) {
            return Err(HeightmapError::InvalidMaxHeight(params.max_height));
        }

        let profile = StyleProfile::for_style(params.style);
        let noise = Perlin::new(PERLIN_SEED);
        let offset = params.seed.value();
        let res = params.resolution;

        let mut values = Vec::with_capacity(res * res);
        for row in 0..res {
            for col in 0..res {
                let nx = row as f64 * profile.frequency + offset;
                let ny = col as f64 * profile.frequency + offset;
                values.push(perlin01(&noise, nx, ny) * profile.amplitude);
            }
        }

        Ok(Self {
            resolution: res,
            world_size: params.world_size,
            max_height: params.max_height,
            amplitude: profile.amplitude,
            values,
        })
    }

    /// Samples per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Side length of the terrain square in world units.
    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    /// World-space height for a normalized value of 1.0.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Upper bound of every normalized value in the grid.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Raw row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Normalized value at a grid cell, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        Some(self.values[row * self.resolution + col])
    }

    /// World-space position of grid cell `(0, 0)`.
    pub fn origin(&self) -> DVec3 {
        let half = self.world_size * 0.5;
        DVec3::new(-half, 0.0, -half)
    }

    /// Bilinearly interpolated normalized height at world `(x, z)`.
    ///
    /// Points outside the terrain square clamp to its edge. Non-finite input
    /// returns 0.
    pub fn sample_normalized(&self, x: f64, z: f64) -> f64 {
        if !(x.is_finite() && z.is_finite()) {
            return 0.0;
        }

        let origin = self.origin();
        let cells = (self.resolution - 1) as f64;
        let u = ((x - origin.x) / self.world_size * cells).clamp(0.0, cells);
        let v = ((z - origin.z) / self.world_size * cells).clamp(0.0, cells);

        let col0 = u.floor() as usize;
        let row0 = v.floor() as usize;
        let col1 = (col0 + 1).min(self.resolution - 1);
        let row1 = (row0 + 1).min(self.resolution - 1);
        let tu = u - col0 as f64;
        let tv = v - row0 as f64;

        let at = |row: usize, col: usize| self.values[row * self.resolution + col];
        let top = lerp(at(row0, col0), at(row0, col1), tu);
        let bottom = lerp(at(row1, col0), at(row1, col1), tu);
        lerp(top, bottom, tv)
    }

    /// Terrain height in world units at world `(x, z)`.
    pub fn sample_world(&self, x: f64, z: f64) -> f64 {
        self.sample_normalized(x, z) * self.max_height
    }

    /// Smallest and largest normalized values in the grid.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Convenience wrapper over [`Heightmap::generate`] using [`DEFAULT_MAX_HEIGHT`].
pub fn generate_heightmap(
    style: EnvironmentStyle,
    world_size: f64,
    resolution: usize,
    seed: TerrainSeed,
) -> Result<Heightmap, HeightmapError> {
    Heightmap::generate(&HeightmapParams {
        style,
        world_size,
        resolution,
        max_height: DEFAULT_MAX_HEIGHT,
        seed,
    })
}

/// Perlin noise normalized from `[-1, 1]` to `[0, 1]`.
fn perlin01(noise: &Perlin, x: f64, y: f64) -> f64 {
    ((noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
