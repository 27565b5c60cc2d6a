//! The generation pipeline: terrain, water, trees, rocks, then the sun.
//!
//! Each stage reads the terrain installed by the first one. A host error
//! aborts the run; a stage whose terrain precondition is unmet is skipped.

use glam::DVec3;
use quickscape_config::{Config, EnvironmentStyle, GenerationConfig, TerrainConfig};
use quickscape_lighting::{LightingSetting, compute_lighting};
use quickscape_terrain::{
    Heightmap, HeightmapParams, Placement, PrimitiveKind, TREE_DENSITY, TerrainSeed,
    WaterPlacement, compute_water_placement, sample_prop_placements, sample_tree_placements,
    scatter_target,
};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::host::{
    GENERATED_NAMES, GenerationStage, HostScene, PROPS_GROUP, PrimitiveSpec, SceneError,
    TREE_NAME, TREES_GROUP, WATER_NAME,
};

/// Summary of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    /// Style the world was generated in.
    pub style: EnvironmentStyle,
    /// Noise offset drawn for the heightmap.
    pub terrain_seed: TerrainSeed,
    /// Smallest and largest normalized heights in the grid.
    pub height_range: (f64, f64),
    /// Water plane, if one was placed.
    pub water: Option<WaterPlacement>,
    /// Trees placed.
    pub trees: Vec<Placement>,
    /// Tree attempts made, accepted or not.
    pub tree_attempts: usize,
    /// Rocks placed.
    pub rocks: Vec<Placement>,
    /// Sun settings applied.
    pub lighting: LightingSetting,
    /// Enabled stages skipped because their precondition was unmet.
    pub skipped: Vec<GenerationStage>,
}

/// Turns a [`GenerationConfig`] into objects in a [`HostScene`].
#[derive(Clone, Debug, Default)]
pub struct SceneGenerator {
    generation: GenerationConfig,
    terrain: TerrainConfig,
}

impl SceneGenerator {
    /// Create a generator for fixed settings.
    pub fn new(generation: GenerationConfig, terrain: TerrainConfig) -> Self {
        Self {
            generation,
            terrain,
        }
    }

    /// Create a generator from a full [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.generation.clone(), config.terrain.clone())
    }

    /// Settings this generator runs with.
    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Run every enabled stage against `scene`.
    ///
    /// All randomness comes from `rng`; the same RNG state and host state
    /// produce the same world.
    ///
    /// # Errors
    ///
    /// Returns the first [`SceneError`] raised. Stages after the failing one
    /// do not run, and objects created before it stay in the scene.
    pub fn generate<S, R>(
        &self,
        scene: &mut S,
        rng: &mut R,
    ) -> Result<GenerationReport, SceneError>
    where
        S: HostScene + ?Sized,
        R: Rng + ?Sized,
    {
        let cfg = &self.generation;
        let style = cfg.style;
        let world_size = f64::from(cfg.world_size.units());
        let mut skipped = Vec::new();

        info!(
            %style,
            world_size,
            time_of_day = ?cfg.time_of_day,
            "generating world"
        );

        scene.report_progress(GenerationStage::CreatingTerrain);
        let terrain_seed = TerrainSeed::draw(rng);
        let heightmap = Heightmap::generate(&HeightmapParams {
            style,
            world_size,
            resolution: self.terrain.resolution,
            max_height: self.terrain.max_height,
            seed: terrain_seed,
        })?;
        let height_range = heightmap.value_range();
        debug!(
            seed = terrain_seed.value(),
            min = height_range.0,
            max = height_range.1,
            "heightmap synthesized"
        );

        scene.report_progress(GenerationStage::ShapingTerrain);
        scene.replace_terrain(heightmap)?;

        let water = compute_water_placement(style, world_size, cfg.water);
        if let Some(water) = &water {
            scene.report_progress(GenerationStage::AddingWater);
            place_water(scene, water)?;
            debug!(level = water.level(), "water placed");
        }

        let mut trees = Vec::new();
        let mut tree_attempts = 0;
        if cfg.trees {
            scene.report_progress(GenerationStage::PlantingTrees);
            if scene.find_terrain().is_some() {
                tree_attempts = scatter_target(world_size, TREE_DENSITY);
                trees = plant_trees(scene, style, world_size, rng)?;
                debug!(planted = trees.len(), attempts = tree_attempts, "trees planted");
            } else {
                warn!("no terrain in scene, skipping trees");
                skipped.push(GenerationStage::PlantingTrees);
            }
        }

        let mut rocks = Vec::new();
        if cfg.props {
            scene.report_progress(GenerationStage::ScatteringProps);
            if scene.find_terrain().is_some() {
                rocks = scatter_rocks(scene, style, world_size, rng)?;
                debug!(scattered = rocks.len(), "rocks scattered");
            } else {
                warn!("no terrain in scene, skipping props");
                skipped.push(GenerationStage::ScatteringProps);
            }
        }

        scene.report_progress(GenerationStage::SettingUpLighting);
        let lighting = compute_lighting(cfg.time_of_day);
        scene.set_sun(&lighting)?;

        scene.report_progress(GenerationStage::Finished);
        info!("world generated: {style} environment");

        Ok(GenerationReport {
            style,
            terrain_seed,
            height_range,
            water,
            trees,
            tree_attempts,
            rocks,
            lighting,
            skipped,
        })
    }

    /// Remove everything a previous run created. Missing objects are ignored,
    /// so clearing twice leaves the scene as clearing once.
    ///
    /// Returns the number of top-level objects removed.
    pub fn clear<S: HostScene + ?Sized>(scene: &mut S) -> usize {
        let mut removed = usize::from(scene.delete_terrain());
        for name in GENERATED_NAMES {
            removed += usize::from(scene.delete_named(name));
        }
        info!(removed, "world cleared");
        removed
    }
}

fn place_water<S: HostScene + ?Sized>(
    scene: &mut S,
    water: &WaterPlacement,
) -> Result<(), SceneError> {
    scene.delete_named(WATER_NAME);
    scene.create_primitive(PrimitiveSpec {
        kind: PrimitiveKind::Plane,
        name: WATER_NAME.to_string(),
        parent: None,
        position: water.position,
        scale: DVec3::new(water.horizontal_scale, 1.0, water.horizontal_scale),
        color: water.color,
        collider: false,
    })?;
    Ok(())
}

fn plant_trees<S, R>(
    scene: &mut S,
    style: EnvironmentStyle,
    world_size: f64,
    rng: &mut R,
) -> Result<Vec<Placement>, SceneError>
where
    S: HostScene + ?Sized,
    R: Rng + ?Sized,
{
    let group = scene.find_or_create_group(TREES_GROUP)?;
    let trees = {
        let host: &S = scene;
        let heights = |x: f64, z: f64| host.sample_terrain_height(x, z).unwrap_or(0.0);
        sample_tree_placements(style, &heights, world_size, rng)
    };

    for tree in &trees {
        let Some(parts) = tree.tree_parts() else {
            continue;
        };
        let tree_group = scene.create_group(TREE_NAME, Some(group))?;
        for (name, part) in [("Trunk", parts.trunk), ("Leaves", parts.foliage)] {
            scene.create_primitive(PrimitiveSpec {
                kind: part.kind,
                name: name.to_string(),
                parent: Some(tree_group),
                position: tree.position + part.local_offset,
                scale: part.scale,
                color: part.color,
                collider: false,
            })?;
        }
    }

    Ok(trees)
}

fn scatter_rocks<S, R>(
    scene: &mut S,
    style: EnvironmentStyle,
    world_size: f64,
    rng: &mut R,
) -> Result<Vec<Placement>, SceneError>
where
    S: HostScene + ?Sized,
    R: Rng + ?Sized,
{
    let group = scene.find_or_create_group(PROPS_GROUP)?;
    let rocks = {
        let host: &S = scene;
        let heights = |x: f64, z: f64| host.sample_terrain_height(x, z).unwrap_or(0.0);
        sample_prop_placements(style, &heights, world_size, rng)
    };

    for rock in &rocks {
        scene.create_primitive(PrimitiveSpec {
            kind: PrimitiveKind::Sphere,
            name: "Rock".to_string(),
            parent: Some(group),
            position: rock.position,
            scale: DVec3::splat(rock.scale),
            color: rock.color,
            collider: false,
        })?;
    }

    Ok(rocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ObjectHandle, SUN_NAME, TERRAIN_NAME};
    use crate::memory::{InMemoryScene, SceneObjectKind};
    use glam::{Vec3, Vec4};
    use quickscape_config::{TimeOfDay, WorldSize};
    use quickscape_terrain::{PROP_DENSITY, TREE_MIN_HEIGHT, generation_rng};

    fn generator(generation: GenerationConfig) -> SceneGenerator {
        // A coarse grid keeps tests fast; sampling still covers the full world.
        let terrain = TerrainConfig {
            resolution: 129,
            ..TerrainConfig::default()
        };
        SceneGenerator::new(generation, terrain)
    }

    fn desert_medium_noon() -> GenerationConfig {
        GenerationConfig {
            style: EnvironmentStyle::Desert,
            world_size: WorldSize::Medium,
            time_of_day: TimeOfDay::Noon,
            water: true,
            trees: true,
            props: true,
            seed: None,
        }
    }

    #[test]
    fn test_desert_end_to_end() {
        let mut scene = InMemoryScene::new();
        let report = generator(desert_medium_noon())
            .generate(&mut scene, &mut generation_rng(11))
            .unwrap();

        let water = report.water.as_ref().unwrap();
        assert_eq!(water.level(), 2.0);
        assert_eq!(water.color, Vec4::new(0.2, 0.5, 0.7, 0.8));

        assert!(report.height_range.0 >= 0.0);
        assert!(report.height_range.1 <= 0.15);

        assert_eq!(report.lighting.intensity, 1.2);
        assert_eq!(report.lighting.elevation_deg, 50.0);
        assert_eq!(scene.sun(), Some(&report.lighting));

        // Desert peaks at 15 units, so some trees may survive.
        assert!(report.trees.len() <= 250);
        assert_eq!(report.tree_attempts, 250);
        assert_eq!(report.rocks.len(), 100);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_night_lighting_regardless_of_style() {
        for style in EnvironmentStyle::ALL {
            let cfg = GenerationConfig {
                style,
                world_size: WorldSize::Small,
                time_of_day: TimeOfDay::Night,
                water: false,
                trees: false,
                props: false,
                seed: None,
            };
            let mut scene = InMemoryScene::new();
            let report = generator(cfg)
                .generate(&mut scene, &mut generation_rng(3))
                .unwrap();
            assert_eq!(report.lighting.elevation_deg, -30.0, "{style}");
            assert_eq!(report.lighting.color, Vec3::new(0.3, 0.3, 0.5), "{style}");
            assert_eq!(report.lighting.intensity, 0.15, "{style}");
        }
    }

    #[test]
    fn test_trees_only_on_high_ground() {
        let cfg = GenerationConfig {
            style: EnvironmentStyle::Snow,
            world_size: WorldSize::Large,
            ..GenerationConfig::default()
        };
        let mut scene = InMemoryScene::new();
        let report = generator(cfg)
            .generate(&mut scene, &mut generation_rng(21))
            .unwrap();

        assert!(report.trees.len() <= 500);
        for tree in &report.trees {
            let sampled = scene
                .sample_terrain_height(tree.position.x, tree.position.z)
                .unwrap();
            assert!(sampled >= TREE_MIN_HEIGHT);
        }

        let group = scene.find_named(TREES_GROUP).unwrap();
        let tree_groups = scene.children(group);
        assert_eq!(tree_groups.len(), report.trees.len());
        for tree in tree_groups {
            assert_eq!(scene.get(tree).unwrap().name, TREE_NAME);
            let parts: Vec<_> = scene
                .children(tree)
                .into_iter()
                .map(|part| scene.get(part).unwrap().name.clone())
                .collect();
            assert_eq!(parts, ["Trunk", "Leaves"]);
        }
    }

    #[test]
    fn test_prop_count_exact() {
        for size in WorldSize::ALL {
            let cfg = GenerationConfig {
                world_size: size,
                water: false,
                trees: false,
                ..GenerationConfig::default()
            };
            let mut scene = InMemoryScene::new();
            let report = generator(cfg)
                .generate(&mut scene, &mut generation_rng(5))
                .unwrap();
            let expected = scatter_target(f64::from(size.units()), PROP_DENSITY);
            assert_eq!(report.rocks.len(), expected, "{size:?}");

            let group = scene.find_named(PROPS_GROUP).unwrap();
            assert_eq!(scene.children(group).len(), expected);
        }
    }

    #[test]
    fn test_same_seed_reproduces_world() {
        let cfg = GenerationConfig {
            style: EnvironmentStyle::Volcanic,
            ..GenerationConfig::default()
        };
        let gen_a = generator(cfg.clone());
        let gen_b = generator(cfg);

        let mut scene_a = InMemoryScene::new();
        let mut scene_b = InMemoryScene::new();
        let a = gen_a.generate(&mut scene_a, &mut generation_rng(99)).unwrap();
        let b = gen_b.generate(&mut scene_b, &mut generation_rng(99)).unwrap();

        assert_eq!(a, b);
        assert_eq!(scene_a.terrain_heightmap(), scene_b.terrain_heightmap());
    }

    #[test]
    fn test_disabled_features_are_not_created() {
        let cfg = GenerationConfig {
            water: false,
            trees: false,
            props: false,
            ..GenerationConfig::default()
        };
        let mut scene = InMemoryScene::new();
        let report = generator(cfg)
            .generate(&mut scene, &mut generation_rng(1))
            .unwrap();

        assert!(report.water.is_none());
        assert!(report.trees.is_empty());
        assert!(report.rocks.is_empty());
        assert!(scene.find_named(WATER_NAME).is_none());
        assert!(scene.find_named(TREES_GROUP).is_none());
        assert!(scene.find_named(PROPS_GROUP).is_none());
        // Terrain and sun only.
        assert_eq!(scene.len(), 2);
        assert_eq!(
            scene.progress_log(),
            &[
                GenerationStage::CreatingTerrain,
                GenerationStage::ShapingTerrain,
                GenerationStage::SettingUpLighting,
                GenerationStage::Finished,
            ]
        );
    }

    #[test]
    fn test_regenerate_replaces_water_and_terrain() {
        let cfg = GenerationConfig {
            trees: false,
            props: false,
            ..GenerationConfig::default()
        };
        let generator = generator(cfg);
        let mut scene = InMemoryScene::new();
        let mut rng = generation_rng(8);
        generator.generate(&mut scene, &mut rng).unwrap();
        generator.generate(&mut scene, &mut rng).unwrap();

        // Terrain, water, sun.
        assert_eq!(scene.len(), 3);
        let water = scene.find_named(WATER_NAME).unwrap();
        match &scene.get(water).unwrap().kind {
            SceneObjectKind::Primitive(spec) => {
                assert_eq!(spec.kind, PrimitiveKind::Plane);
                assert_eq!(spec.scale, DVec3::new(62.5, 1.0, 62.5));
                assert!(!spec.collider);
            }
            other => panic!("water should be a primitive, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_primitive_aborts_remaining_stages() {
        let mut scene = InMemoryScene::new().without_primitive(PrimitiveKind::Plane);
        let result = generator(GenerationConfig::default())
            .generate(&mut scene, &mut generation_rng(4));

        assert!(matches!(
            result,
            Err(SceneError::UnsupportedPrimitive(PrimitiveKind::Plane))
        ));
        // Terrain was installed before the failure; nothing after it ran.
        assert!(scene.find_named(TERRAIN_NAME).is_some());
        assert!(scene.find_named(TREES_GROUP).is_none());
        assert!(scene.sun().is_none());
        assert_eq!(
            scene.progress_log().last(),
            Some(&GenerationStage::AddingWater)
        );
    }

    #[test]
    fn test_invalid_resolution_fails_before_touching_scene() {
        let generator = SceneGenerator::new(
            GenerationConfig::default(),
            TerrainConfig {
                resolution: 1,
                ..TerrainConfig::default()
            },
        );
        let mut scene = InMemoryScene::new();
        let result = generator.generate(&mut scene, &mut generation_rng(0));
        assert!(matches!(result, Err(SceneError::Heightmap(_))));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut scene = InMemoryScene::new();
        generator(GenerationConfig::default())
            .generate(&mut scene, &mut generation_rng(12))
            .unwrap();
        assert!(!scene.is_empty());

        let removed = SceneGenerator::clear(&mut scene);
        assert_eq!(removed, 5);
        assert!(scene.is_empty());

        assert_eq!(SceneGenerator::clear(&mut scene), 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_clear_keeps_unrelated_objects() {
        let mut scene = InMemoryScene::new();
        scene.find_or_create_group("Player").unwrap();
        generator(GenerationConfig::default())
            .generate(&mut scene, &mut generation_rng(13))
            .unwrap();
        SceneGenerator::clear(&mut scene);
        assert_eq!(scene.len(), 1);
        assert!(scene.find_named("Player").is_some());
        assert!(scene.find_named(SUN_NAME).is_none());
    }

    /// Host that accepts terrain but never reports it back.
    #[derive(Default)]
    struct ForgetfulHost {
        inner: InMemoryScene,
    }

    impl HostScene for ForgetfulHost {
        fn find_terrain(&self) -> Option<ObjectHandle> {
            None
        }
        fn replace_terrain(
            &mut self,
            _heightmap: Heightmap,
        ) -> Result<ObjectHandle, SceneError> {
            Ok(ObjectHandle(0))
        }
        fn delete_terrain(&mut self) -> bool {
            false
        }
        fn find_or_create_group(
            &mut self,
            name: &str,
        ) -> Result<ObjectHandle, SceneError> {
            self.inner.find_or_create_group(name)
        }
        fn create_group(
            &mut self,
            name: &str,
            parent: Option<ObjectHandle>,
        ) -> Result<ObjectHandle, SceneError> {
            self.inner.create_group(name, parent)
        }
        fn create_primitive(
            &mut self,
            spec: PrimitiveSpec,
        ) -> Result<ObjectHandle, SceneError> {
            self.inner.create_primitive(spec)
        }
        fn sample_terrain_height(&self, _x: f64, _z: f64) -> Option<f64> {
            None
        }
        fn delete_named(&mut self, name: &str) -> bool {
            self.inner.delete_named(name)
        }
        fn set_sun(
            &mut self,
            lighting: &LightingSetting,
        ) -> Result<ObjectHandle, SceneError> {
            self.inner.set_sun(lighting)
        }
    }

    #[test]
    fn test_missing_terrain_skips_placement_stages() {
        let mut host = ForgetfulHost::default();
        let report = generator(GenerationConfig::default())
            .generate(&mut host, &mut generation_rng(2))
            .unwrap();

        assert_eq!(
            report.skipped,
            vec![
                GenerationStage::PlantingTrees,
                GenerationStage::ScatteringProps
            ]
        );
        assert!(report.trees.is_empty());
        assert!(report.rocks.is_empty());
        assert!(report.water.is_some());
        assert!(host.inner.sun().is_some());
    }

    #[test]
    fn test_generate_through_trait_object() {
        let mut scene = InMemoryScene::new();
        let host: &mut dyn HostScene = &mut scene;
        let report = generator(GenerationConfig::default())
            .generate(host, &mut generation_rng(6))
            .unwrap();
        assert_eq!(report.style, EnvironmentStyle::Forest);
    }
}
