//! Host-scene integration for Quickscape.
//!
//! [`HostScene`] is the capability interface an editor or engine implements;
//! [`SceneGenerator`] drives a full generation run (or a clear) through it.
//! [`InMemoryScene`] is a standalone host used by the CLI and in tests.

mod generator;
mod host;
mod memory;

pub use generator::{GenerationReport, SceneGenerator};
pub use host::{
    GENERATED_NAMES, GenerationStage, HostScene, ObjectHandle, PROPS_GROUP, PrimitiveSpec,
    SUN_NAME, SceneError, TERRAIN_NAME, TREE_NAME, TREES_GROUP, WATER_NAME,
};
pub use memory::{InMemoryScene, SceneObject, SceneObjectKind};
pub use quickscape_terrain::PrimitiveKind;
