//! A self-contained [`HostScene`] backed by a flat object table.
//!
//! Used by the command-line front end and as the fake host in tests. Objects
//! form a tree through parent handles; deleting an object deletes its
//! descendants.

use hashbrown::{HashMap, HashSet};
use quickscape_lighting::LightingSetting;
use quickscape_terrain::{Heightmap, PrimitiveKind};

use crate::host::{
    GenerationStage, HostScene, ObjectHandle, PrimitiveSpec, SUN_NAME, SceneError, TERRAIN_NAME,
};

/// What an object in the table is.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneObjectKind {
    /// The terrain; its heights live in [`InMemoryScene`] itself.
    Terrain,
    /// Empty container.
    Group,
    /// Renderable primitive.
    Primitive(PrimitiveSpec),
    /// Directional light.
    Sun(LightingSetting),
}

/// One entry of the object table.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Name shown in the hierarchy.
    pub name: String,
    /// Containing object, `None` for roots.
    pub parent: Option<ObjectHandle>,
    /// Payload.
    pub kind: SceneObjectKind,
}

/// In-memory scene graph.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    objects: HashMap<ObjectHandle, SceneObject>,
    next_id: u64,
    terrain: Option<(ObjectHandle, Heightmap)>,
    unsupported: HashSet<PrimitiveKind>,
    progress: Vec<GenerationStage>,
}

impl InMemoryScene {
    /// Create an empty scene supporting every primitive kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `kind` unavailable, so creating it fails with
    /// [`SceneError::UnsupportedPrimitive`].
    pub fn without_primitive(mut self, kind: PrimitiveKind) -> Self {
        self.unsupported.insert(kind);
        self
    }

    /// Number of objects in the scene, terrain included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up an object.
    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// The oldest object with this name.
    pub fn find_named(&self, name: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.name == name)
            .map(|(&handle, _)| handle)
            .min()
    }

    /// Direct children of `parent`, oldest first.
    pub fn children(&self, parent: ObjectHandle) -> Vec<ObjectHandle> {
        let mut children: Vec<_> = self
            .objects
            .iter()
            .filter(|(_, obj)| obj.parent == Some(parent))
            .map(|(&handle, _)| handle)
            .collect();
        children.sort_unstable();
        children
    }

    /// Heightmap backing the current terrain.
    pub fn terrain_heightmap(&self) -> Option<&Heightmap> {
        self.terrain.as_ref().map(|(_, map)| map)
    }

    /// Current sun settings.
    pub fn sun(&self) -> Option<&LightingSetting> {
        self.objects.values().find_map(|obj| match &obj.kind {
            SceneObjectKind::Sun(lighting) => Some(lighting),
            _ => None,
        })
    }

    /// Stages reported so far, in order.
    pub fn progress_log(&self) -> &[GenerationStage] {
        &self.progress
    }

    fn insert(
        &mut self,
        name: &str,
        parent: Option<ObjectHandle>,
        kind: SceneObjectKind,
    ) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            handle,
            SceneObject {
                name: name.to_string(),
                parent,
                kind,
            },
        );
        handle
    }

    fn check_parent(&self, parent: Option<ObjectHandle>) -> Result<(), SceneError> {
        match parent {
            Some(parent) if !self.objects.contains_key(&parent) => {
                Err(SceneError::UnknownParent(parent))
            }
            _ => Ok(()),
        }
    }

    /// Remove `root` and all of its descendants.
    fn remove_subtree(&mut self, root: ObjectHandle) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if self.objects.remove(&handle).is_none() {
                continue;
            }
            stack.extend(
                self.objects
                    .iter()
                    .filter(|(_, obj)| obj.parent == Some(handle))
                    .map(|(&child, _)| child),
            );
            if matches!(self.terrain, Some((terrain, _)) if terrain == handle) {
                self.terrain = None;
            }
        }
    }
}

impl HostScene for InMemoryScene {
    fn find_terrain(&self) -> Option<ObjectHandle> {
        self.terrain.as_ref().map(|(handle, _)| *handle)
    }

    fn replace_terrain(&mut self, heightmap: Heightmap) -> Result<ObjectHandle, SceneError> {
        self.delete_terrain();
        let handle = self.insert(TERRAIN_NAME, None, SceneObjectKind::Terrain);
        self.terrain = Some((handle, heightmap));
        Ok(handle)
    }

    fn delete_terrain(&mut self) -> bool {
        match self.find_terrain() {
            Some(handle) => {
                self.remove_subtree(handle);
                true
            }
            None => false,
        }
    }

    fn find_or_create_group(&mut self, name: &str) -> Result<ObjectHandle, SceneError> {
        let existing = self
            .objects
            .iter()
            .filter(|(_, obj)| obj.name == name && obj.parent.is_none())
            .map(|(&handle, _)| handle)
            .min();
        Ok(existing.unwrap_or_else(|| self.insert(name, None, SceneObjectKind::Group)))
    }

    fn create_group(
        &mut self,
        name: &str,
        parent: Option<ObjectHandle>,
    ) -> Result<ObjectHandle, SceneError> {
        self.check_parent(parent)?;
        Ok(self.insert(name, parent, SceneObjectKind::Group))
    }

    fn create_primitive(&mut self, spec: PrimitiveSpec) -> Result<ObjectHandle, SceneError> {
        if self.unsupported.contains(&spec.kind) {
            return Err(SceneError::UnsupportedPrimitive(spec.kind));
        }
        self.check_parent(spec.parent)?;
        let name = spec.name.clone();
        let parent = spec.parent;
        Ok(self.insert(&name, parent, SceneObjectKind::Primitive(spec)))
    }

    fn sample_terrain_height(&self, x: f64, z: f64) -> Option<f64> {
        self.terrain_heightmap().map(|map| map.sample_world(x, z))
    }

    fn delete_named(&mut self, name: &str) -> bool {
        match self.find_named(name) {
            Some(handle) => {
                self.remove_subtree(handle);
                true
            }
            None => false,
        }
    }

    fn set_sun(&mut self, lighting: &LightingSetting) -> Result<ObjectHandle, SceneError> {
        let existing = self
            .objects
            .iter_mut()
            .filter(|(_, obj)| matches!(obj.kind, SceneObjectKind::Sun(_)))
            .min_by_key(|(handle, _)| **handle);

        if let Some((&handle, obj)) = existing {
            obj.kind = SceneObjectKind::Sun(lighting.clone());
            return Ok(handle);
        }
        Ok(self.insert(SUN_NAME, None, SceneObjectKind::Sun(lighting.clone())))
    }

    fn report_progress(&mut self, stage: GenerationStage) {
        self.progress.push(stage);
    }
}
