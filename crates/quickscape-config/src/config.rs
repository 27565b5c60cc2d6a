//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::environment::{EnvironmentStyle, TimeOfDay, WorldSize};
use crate::error::ConfigError;

const APP_NAME: &str = "quickscape";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to generate.
    pub generation: GenerationConfig,
    /// Terrain grid settings.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// The choices made on the generator form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Visual theme.
    pub style: EnvironmentStyle,
    /// Side length of the world.
    pub world_size: WorldSize,
    /// Sun preset.
    pub time_of_day: TimeOfDay,
    /// Place a water plane.
    pub water: bool,
    /// Scatter trees.
    pub trees: bool,
    /// Scatter rocks.
    pub props: bool,
    /// Fixed RNG seed. `None` draws a fresh seed every run.
    pub seed: Option<u64>,
}

/// Terrain grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Heightmap samples per side.
    pub resolution: usize,
    /// World-space height that a normalized height of 1.0 maps to.
    pub max_height: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            style: EnvironmentStyle::default(),
            world_size: WorldSize::default(),
            time_of_day: TimeOfDay::default(),
            water: true,
            trees: true,
            props: true,
            seed: None,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 513,
            max_height: 100.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default directory holding `config.ron`, e.g. `~/.config/quickscape` on Linux.
///
/// Returns `None` if the OS does not expose a configuration directory.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
            let config: Config =
                ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::write(config_dir))?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::write(&config_path))?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents =
            std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
        let new_config: Config =
            ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("style: Forest"));
        assert!(ron_str.contains("resolution: 513"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.generation.style = EnvironmentStyle::Snow;
        config.generation.seed = Some(77);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(generation: (style: Desert))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.generation.style, EnvironmentStyle::Desert);
        assert!(config.generation.water);
        assert_eq!(config.terrain, TerrainConfig::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generation.world_size = WorldSize::Huge;
        config.generation.time_of_day = TimeOfDay::Night;
        config.generation.props = false;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.generation.style = EnvironmentStyle::Tropical;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(
            result.map(|c| c.generation.style),
            Some(EnvironmentStyle::Tropical)
        );
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let path = dir.path().join("config.ron");
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_reload_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert_eq!(err.path(), Some(dir.path().join("config.ron").as_path()));
    }

    #[test]
    fn test_save_into_file_names_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let err = Config::default().save(&blocker).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError { .. }));
        assert_eq!(err.path(), Some(blocker.as_path()));
    }

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
