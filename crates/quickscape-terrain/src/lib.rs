//! Procedural scene synthesis: style tables, Perlin heightmaps, and water, tree,
//! and rock placement over a square terrain.

mod heightmap;
mod placement;
mod seed;
mod style;
mod water;

pub use heightmap::{
    DEFAULT_MAX_HEIGHT, DEFAULT_RESOLUTION, Heightmap, HeightmapError, HeightmapParams,
    MAX_RESOLUTION, generate_heightmap,
};
pub use placement::{
    PROP_DENSITY, PROP_LIFT, PROP_SCALE_RANGE, PartSpec, Placement, PlacementKind, PrimitiveKind,
    TREE_DENSITY, TREE_MIN_HEIGHT, TREE_SCALE_RANGE, TreeParts, sample_prop_placements,
    sample_tree_placements, scatter_target,
};
pub use seed::{TERRAIN_SEED_RANGE, TerrainSeed, entropy_seed, generation_rng};
pub use style::{StyleProfile, TRUNK_COLOR};
pub use water::{PLANE_PRIMITIVE_WIDTH, WaterPlacement, compute_water_placement};
