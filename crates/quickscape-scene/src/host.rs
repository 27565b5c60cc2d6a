//! The capability interface a host scene exposes to the generator.

use glam::{DVec3, Vec4};
use quickscape_lighting::LightingSetting;
use quickscape_terrain::{Heightmap, HeightmapError, PrimitiveKind};

/// Logical name of the terrain object.
pub const TERRAIN_NAME: &str = "Terrain";
/// Logical name of the water plane.
pub const WATER_NAME: &str = "Water";
/// Logical name of the group holding tree primitives.
pub const TREES_GROUP: &str = "Trees";
/// Name of the per-tree group holding one trunk and its leaves.
pub const TREE_NAME: &str = "Tree";
/// Logical name of the group holding rock primitives.
pub const PROPS_GROUP: &str = "Props";
/// Logical name of the sun light.
pub const SUN_NAME: &str = "Sun";

/// Named objects removed by a clear, after the terrain.
pub const GENERATED_NAMES: [&str; 4] = [WATER_NAME, TREES_GROUP, PROPS_GROUP, SUN_NAME];

/// Opaque reference to an object owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHandle(pub u64);

/// Errors a host can raise while the scene is being mutated.
///
/// Any of these aborts the rest of the generation run.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The host cannot instantiate this primitive shape.
    #[error("host does not support {0:?} primitives")]
    UnsupportedPrimitive(PrimitiveKind),
    /// A primitive referenced a parent the host does not know.
    #[error("unknown parent object {0:?}")]
    UnknownParent(ObjectHandle),
    /// The host refused the terrain data.
    #[error("host rejected terrain: {0}")]
    TerrainRejected(String),
    /// The heightmap could not be synthesized.
    #[error(transparent)]
    Heightmap(#[from] HeightmapError),
}

/// Everything the host needs to instantiate one renderable primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveSpec {
    /// Shape.
    pub kind: PrimitiveKind,
    /// Object name shown in the host's hierarchy.
    pub name: String,
    /// Group to attach to, or `None` for a root object.
    pub parent: Option<ObjectHandle>,
    /// World-space position.
    pub position: DVec3,
    /// Per-axis scale.
    pub scale: DVec3,
    /// Linear RGBA material color.
    pub color: Vec4,
    /// Whether the host should attach a physics collider.
    pub collider: bool,
}

/// Progress milestones announced to the host during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    /// Synthesizing the heightmap.
    CreatingTerrain,
    /// Handing the heightmap to the host.
    ShapingTerrain,
    /// Placing the water plane.
    AddingWater,
    /// Scattering trees.
    PlantingTrees,
    /// Scattering rocks.
    ScatteringProps,
    /// Orienting the sun.
    SettingUpLighting,
    /// Run complete.
    Finished,
}

impl GenerationStage {
    /// Fraction of the run completed when this stage starts.
    pub fn progress(self) -> f32 {
        match self {
            Self::CreatingTerrain => 0.1,
            Self::ShapingTerrain => 0.3,
            Self::AddingWater => 0.5,
            Self::PlantingTrees => 0.7,
            Self::ScatteringProps => 0.85,
            Self::SettingUpLighting => 0.95,
            Self::Finished => 1.0,
        }
    }

    /// Status line for a progress indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreatingTerrain => "Creating terrain...",
            Self::ShapingTerrain => "Shaping terrain...",
            Self::AddingWater => "Adding water...",
            Self::PlantingTrees => "Planting trees...",
            Self::ScatteringProps => "Scattering props...",
            Self::SettingUpLighting => "Setting up lighting...",
            Self::Finished => "Done",
        }
    }
}

/// Scene-graph operations the generator relies on.
///
/// Implemented by an adapter over whatever editor or engine owns the scene.
/// Calls arrive on one thread, one run at a time.
pub trait HostScene {
    /// The current terrain object, if any.
    fn find_terrain(&self) -> Option<ObjectHandle>;

    /// Remove any existing terrain and install one built from `heightmap`,
    /// with its corner at [`Heightmap::origin`].
    fn replace_terrain(&mut self, heightmap: Heightmap) -> Result<ObjectHandle, SceneError>;

    /// Remove the terrain. Returns `true` if one existed.
    fn delete_terrain(&mut self) -> bool;

    /// Find a root group by name, creating an empty one if missing.
    fn find_or_create_group(&mut self, name: &str) -> Result<ObjectHandle, SceneError>;

    /// Create an empty group under `parent`, or at the root for `None`.
    fn create_group(
        &mut self,
        name: &str,
        parent: Option<ObjectHandle>,
    ) -> Result<ObjectHandle, SceneError>;

    /// Instantiate a primitive.
    fn create_primitive(&mut self, spec: PrimitiveSpec) -> Result<ObjectHandle, SceneError>;

    /// World-space terrain height at `(x, z)`, or `None` without terrain.
    fn sample_terrain_height(&self, x: f64, z: f64) -> Option<f64>;

    /// Remove the first object with this name and everything under it.
    /// Returns `true` if something was removed.
    fn delete_named(&mut self, name: &str) -> bool;

    /// Apply a lighting preset to the scene's directional light, creating a
    /// light named [`SUN_NAME`] if the scene has none.
    fn set_sun(&mut self, lighting: &LightingSetting) -> Result<ObjectHandle, SceneError>;

    /// Progress notification. Cosmetic; the default ignores it.
    fn report_progress(&mut self, _stage: GenerationStage) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: [GenerationStage; 7] = [
        GenerationStage::CreatingTerrain,
        GenerationStage::ShapingTerrain,
        GenerationStage::AddingWater,
        GenerationStage::PlantingTrees,
        GenerationStage::ScatteringProps,
        GenerationStage::SettingUpLighting,
        GenerationStage::Finished,
    ];

    #[test]
    fn test_stage_progress_strictly_increasing() {
        for pair in STAGES.windows(2) {
            assert!(
                pair[0].progress() < pair[1].progress(),
                "{:?} should come before {:?}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(GenerationStage::Finished.progress(), 1.0);
    }

    #[test]
    fn test_every_stage_has_label() {
        for stage in STAGES {
            assert!(!stage.label().is_empty());
        }
    }

    #[test]
    fn test_error_messages() {
        let err = SceneError::UnsupportedPrimitive(PrimitiveKind::Cylinder);
        assert_eq!(err.to_string(), "host does not support Cylinder primitives");

        let err: SceneError = HeightmapError::InvalidResolution(0).into();
        assert_eq!(err.to_string(), "heightmap resolution must be in 2..=4097, got 0");
    }
}
