//! Structured logging and tracing for Quickscape.
//!
//! Provides structured, filterable logging via the `tracing` ecosystem.
//! Supports console output with uptime timestamps and module paths, plus JSON
//! file logging in debug builds for post-mortem analysis. Integrates with the
//! configuration system to allow runtime log level control.

use quickscape_config::Config;
use std::path::Path;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "quickscape.log";

/// Handle to the installed subscriber's level filter.
///
/// Logging is brought up before `config.ron` is read, so the configured level
/// is applied afterwards through this handle.
#[derive(Clone, Debug)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch the filter to the config's `debug.log_level`.
    ///
    /// Does nothing when the filter came from `RUST_LOG`.
    pub fn apply_config(&self, config: &Config) -> Result<(), reload::Error> {
        if self.from_env {
            return Ok(());
        }
        self.filter.reload(EnvFilter::new(filter_directive(Some(config))))
    }
}

/// Initialize the global tracing subscriber.
///
/// Sets up structured logging with:
/// - Console output with uptime timestamps, module paths, and severity levels
/// - JSON file logging in debug builds (optional)
/// - Environment-based filtering (respects RUST_LOG)
/// - Integration with the config `debug.log_level` setting
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
/// A log directory that cannot be created only disables the file layer.
///
/// # Examples
///
/// ```no_run
/// use quickscape_log::init_logging;
/// use quickscape_config::Config;
///
/// let config = Config::default();
/// let logging = init_logging(None, cfg!(debug_assertions), Some(&config)).ok();
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<LogHandle, TryInitError> {
    // RUST_LOG wins over the configured level.
    let (env_filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(filter_directive(config)), false),
    };
    let (env_filter, filter) = reload::Layer::new(env_filter);
    let handle = LogHandle { filter, from_env };

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).try_init()?;
        return Ok(handle);
    }

    subscriber.try_init()?;
    Ok(handle)
}

/// Resolve the filter directive from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_without_config() {
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_filter_directive_uses_config_level() {
        let mut config = Config::default();
        config.debug.log_level = "debug,quickscape_scene=trace".to_string();
        assert_eq!(
            filter_directive(Some(&config)),
            "debug,quickscape_scene=trace"
        );
    }

    #[test]
    fn test_filter_directive_blank_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,quickscape_terrain=trace",
            "warn,quickscape_scene=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_init_writes_log_file_and_rejects_second_init() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let handle = init_logging(Some(&log_dir), true, None).unwrap();
        assert!(log_dir.join(LOG_FILE_NAME).exists());

        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        assert!(handle.apply_config(&config).is_ok());

        let other_dir = temp_dir.path().join("other");
        assert!(init_logging(Some(&other_dir), false, None).is_err());
        assert!(
            !other_dir.exists(),
            "Release builds must not create a log directory"
        );
    }
}
