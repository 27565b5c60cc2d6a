//! Tree and rock scattering over the terrain square.
//!
//! Candidates are drawn uniformly over the terrain and their height is read
//! through a caller-supplied height function, so the same code runs against a
//! local [`Heightmap`](crate::Heightmap) or a host's own terrain.

use glam::{DVec3, Vec4};
use quickscape_config::EnvironmentStyle;
use rand::Rng;

use crate::style::{StyleProfile, TRUNK_COLOR};

/// Trees per world unit of side length.
pub const TREE_DENSITY: f64 = 0.5;
/// Rocks per world unit of side length.
pub const PROP_DENSITY: f64 = 0.2;
/// Candidates sampled below this world height are dropped.
pub const TREE_MIN_HEIGHT: f64 = 12.0;
/// Tree scale range, inclusive.
pub const TREE_SCALE_RANGE: (f64, f64) = (0.8, 1.5);
/// Rock scale range, inclusive.
pub const PROP_SCALE_RANGE: (f64, f64) = (0.3, 1.5);
/// Rocks float this far above the sampled surface.
pub const PROP_LIFT: f64 = 0.3;

/// Renderable primitive shapes the host must be able to instantiate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Flat square, 10 units wide at scale 1.
    Plane,
    /// Upright cylinder, 2 units tall at scale 1.
    Cylinder,
    /// Unit-diameter sphere.
    Sphere,
}

/// What a placement stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Trunk plus foliage pair, see [`TreeParts`].
    Tree,
    /// Single sphere.
    Rock,
}

/// A scattered object on the terrain surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// World-space anchor. For trees this is the trunk base on the surface.
    pub position: DVec3,
    /// Uniform scale multiplier.
    pub scale: f64,
    /// What to instantiate.
    pub kind: PlacementKind,
    /// Linear RGBA color. For trees this is the foliage color.
    pub color: Vec4,
}

/// One primitive of a composite placement, relative to its anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct PartSpec {
    /// Shape to instantiate.
    pub kind: PrimitiveKind,
    /// Offset from the placement anchor.
    pub local_offset: DVec3,
    /// Per-axis scale.
    pub scale: DVec3,
    /// Linear RGBA color.
    pub color: Vec4,
}

/// Geometry of a single tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParts {
    /// Thin brown cylinder.
    pub trunk: PartSpec,
    /// Sphere sitting on top of the trunk.
    pub foliage: PartSpec,
}

impl TreeParts {
    /// Build trunk and foliage for a tree of the given scale and foliage color.
    pub fn new(scale: f64, leaf_color: Vec4) -> Self {
        Self {
            trunk: PartSpec {
                kind: PrimitiveKind::Cylinder,
                local_offset: DVec3::new(0.0, 2.0 * scale, 0.0),
                scale: DVec3::new(0.3 * scale, 2.0 * scale, 0.3 * scale),
                color: TRUNK_COLOR,
            },
            foliage: PartSpec {
                kind: PrimitiveKind::Sphere,
                local_offset: DVec3::new(0.0, 4.5 * scale, 0.0),
                scale: DVec3::splat(3.0 * scale),
                color: leaf_color,
            },
        }
    }
}

impl Placement {
    /// Trunk and foliage for a tree placement, `None` for anything else.
    pub fn tree_parts(&self) -> Option<TreeParts> {
        match self.kind {
            PlacementKind::Tree => Some(TreeParts::new(self.scale, self.color)),
            PlacementKind::Rock => None,
        }
    }
}

/// Number of scatter attempts for a world of the given side length.
pub fn scatter_target(world_size: f64, density: f64) -> usize {
    (world_size * density).round().max(0.0) as usize
}

/// Scatter trees over the terrain square `[-size/2, size/2)²`.
///
/// Runs exactly `scatter_target(world_size, TREE_DENSITY)` attempts. An attempt
/// whose sampled height is below [`TREE_MIN_HEIGHT`] is dropped rather than
/// retried, so the result may hold fewer trees than attempts.
pub fn sample_tree_placements<R: Rng + ?Sized>(
    style: EnvironmentStyle,
    heights: &dyn Fn(f64, f64) -> f64,
    world_size: f64,
    rng: &mut R,
) -> Vec<Placement> {
    let leaf_color = StyleProfile::for_style(style).leaf_color;
    let attempts = scatter_target(world_size, TREE_DENSITY);
    let mut trees = Vec::with_capacity(attempts);

    for _ in 0..attempts {
        let (x, z) = random_point(world_size, rng);
        let height = heights(x, z);
        if height < TREE_MIN_HEIGHT {
            continue;
        }

        let scale = rng.random_range(TREE_SCALE_RANGE.0..=TREE_SCALE_RANGE.1);
        trees.push(Placement {
            position: DVec3::new(x, height, z),
            scale,
            kind: PlacementKind::Tree,
            color: leaf_color,
        });
    }

    trees
}

/// Scatter rocks over the terrain square `[-size/2, size/2)²`.
///
/// Every attempt is kept; rocks sit [`PROP_LIFT`] above the surface.
pub fn sample_prop_placements<R: Rng + ?Sized>(
    style: EnvironmentStyle,
    heights: &dyn Fn(f64, f64) -> f64,
    world_size: f64,
    rng: &mut R,
) -> Vec<Placement> {
    let prop_color = StyleProfile::for_style(style).prop_color;
    let count = scatter_target(world_size, PROP_DENSITY);

    (0..count)
        .map(|_| {
            let (x, z) = random_point(world_size, rng);
            let y = heights(x, z) + PROP_LIFT;
            let scale = rng.random_range(PROP_SCALE_RANGE.0..=PROP_SCALE_RANGE.1);
            Placement {
                position: DVec3::new(x, y, z),
                scale,
                kind: PlacementKind::Rock,
                color: prop_color,
            }
        })
        .collect()
}

fn random_point<R: Rng + ?Sized>(world_size: f64, rng: &mut R) -> (f64, f64) {
    let half = world_size * 0.5;
    let x = -half + rng.random::<f64>() * world_size;
    let z = -half + rng.random::<f64>() * world_size;
    (x, z)
}
