//! # Logger
//!
//! Installs the global `tracing` subscriber for applications built on the
//! herald event hub. Everything is driven by a [`LoggerConfig`], which
//! deserializes straight out of the application's configuration file:
//!
//! * a compact, colored console layer;
//! * an optional rolling file layer written through a non-blocking worker,
//!   plain text or JSON;
//! * an [`EnvFilter`] seeded with `level`, refined by `directives`
//!   (e.g., `"herald_events=trace,herald_demo=debug"`) and by `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! use herald_logger::{LevelFilter, Logger, LoggerConfig};
//!
//! let config = LoggerConfig::named("my-app").with_level(LevelFilter::DEBUG);
//! let _logger = Logger::init(&config).unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_NAME: &str = "herald";
const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// How often the file layer starts a new log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}

/// Logging settings, usually a `[logger]` section of the application config.
///
/// Missing keys fall back to [`LoggerConfig::default`]: console output at
/// `info`, no file output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Identifier of the application; also the prefix of rolling log files.
    pub name: String,
    /// Default level, parsed as a [`LevelFilter`] (`"off"`, `"error"` .. `"trace"`).
    pub level: String,
    /// Extra filter directives applied on top of `level`.
    pub directives: Option<String>,
    pub console: bool,
    /// Directory for rolling log files. File output is disabled when unset.
    pub path: Option<PathBuf>,
    pub rotation: RotationPolicy,
    pub max_files: usize,
    /// Writes the file layer as JSON lines.
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            level: LevelFilter::INFO.to_string(),
            directives: None,
            console: true,
            path: None,
            rotation: RotationPolicy::default(),
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

impl LoggerConfig {
    /// Default settings under the given application name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level.to_string();
        self
    }

    #[must_use]
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enables file output under `path`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Parses [`LoggerConfig::level`].
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        self.level.trim().parse().map_err(|_| LoggerError::InvalidConfiguration {
            message: format!("Unknown log level '{}'", self.level).into(),
            context: None,
        })
    }
}

/// A handle to the initialized logging system.
///
/// Holds the worker guard of the file layer; dropping it flushes pending
/// records. Keep it alive until the application shuts down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Validates `config` and installs the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid settings or
    /// when no layer is enabled, [`LoggerError::Io`] if the log directory
    /// cannot be created, [`LoggerError::Appender`] if the rolling file
    /// cannot be opened and [`LoggerError::Subscriber`] if a global
    /// subscriber has already been set.
    pub fn init(config: &LoggerConfig) -> Result<Self, LoggerError> {
        let level = validate_config(config)?;
        let env_filter = build_env_filter(level, config.directives.as_deref())?;

        let mut layers = Vec::new();

        if config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = &config.path {
            fs::create_dir_all(path)
                .context(format!("Failed to create path: {}", path.display()))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(config.rotation.into())
                .filename_prefix(&config.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);

            layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry()
            .with(env_filter)
            .with(layers)
            .try_init()
            .map_err(LoggerError::from)
            .context(format!("logger '{}'", config.name))?;

        tracing::debug!(name = %config.name, %level, file = guard.is_some(), "Logger initialized");

        Ok(Self { guard })
    }

    /// Best-effort synchronization point before shutdown.
    ///
    /// Buffered records are written when the handle is dropped.
    pub fn flush(&self) {
        tracing::debug!("Logger flushed");
    }

    /// Returns the worker guard of the file layer, if file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig) -> Result<LevelFilter, LoggerError> {
    if config.name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    config.level_filter()
}

fn build_env_filter(
    level: LevelFilter,
    directives: Option<&str>,
) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    directives.map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid filter directives '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.name, "herald");
        assert!(config.console);
        assert!(config.path.is_none());
        assert_eq!(config.rotation, RotationPolicy::Daily);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn test_config_setters() {
        let config = LoggerConfig::named("orders")
            .with_level(LevelFilter::DEBUG)
            .with_directives("herald_events=trace")
            .with_console(false)
            .with_path("logs")
            .with_json(true);

        assert_eq!(config.name, "orders");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.directives.as_deref(), Some("herald_events=trace"));
        assert!(!config.console);
        assert_eq!(config.path, Some(PathBuf::from("logs")));
        assert!(config.json);
    }

    #[test]
    fn test_level_parsing_is_case_insensitive() {
        let mut config = LoggerConfig::default();
        config.level = " WARN ".to_owned();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::WARN);

        config.level = "loud".to_owned();
        let err = config.level_filter().unwrap_err();
        assert_eq!(err.to_string(), "Invalid logger configuration: Unknown log level 'loud'");
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let unnamed = LoggerConfig::named("  ");
        assert!(matches!(
            validate_config(&unnamed),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let mut no_files = LoggerConfig::default();
        no_files.max_files = 0;
        let err = validate_config(&no_files).unwrap_err();
        assert!(err.to_string().contains("max_files"));
    }

    #[test]
    fn test_invalid_directives_are_reported() {
        let err = build_env_filter(LevelFilter::INFO, Some("herald=loud")).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rotation_policy_maps_to_rotation() {
        assert_eq!(Rotation::from(RotationPolicy::Hourly), Rotation::HOURLY);
        assert_eq!(Rotation::from(RotationPolicy::Never), Rotation::NEVER);
    }

    #[test]
    fn test_io_context_is_attached() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let err = result.context("Failed to create path: /var/log/herald").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Log directory error (Failed to create path: /var/log/herald): denied"
        );
    }

    #[test]
    #[serial]
    fn test_console_and_file_layers_are_refused_when_disabled() {
        let config = LoggerConfig::named("silent").with_console(false);
        let err = Logger::init(&config).unwrap_err();
        assert!(err.to_string().contains("No logging layers enabled"));
    }

    #[test]
    #[serial]
    fn test_file_logging_setup() -> Result<(), LoggerError> {
        let tmp_dir = tempdir().context("Failed to create temp dir")?;
        let log_dir = tmp_dir.path().join("logs");

        let config = LoggerConfig::named("test-app").with_console(false).with_path(&log_dir);
        let logger = Logger::init(&config)?;

        tracing::info!("hello world");
        // Give the background worker a moment, then flush explicitly.
        std::thread::sleep(Duration::from_millis(20));
        logger.flush();

        assert!(log_dir.exists(), "log directory should be created by logger init");

        let entries = fs::read_dir(&log_dir)
            .context(format!("Failed to read log directory {}", log_dir.display()))?;

        let has_log = entries
            .flatten()
            .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));

        assert!(has_log, "at least one log file should be created");
        Ok(())
    }
}
