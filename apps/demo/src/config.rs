use config::{Config, Environment, File};
use herald_logger::LoggerConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG: &str = "herald";
/// Prefix of environment overrides, e.g. `HERALD__WORKFLOW__ORDERS`.
pub const ENV_PREFIX: &str = "HERALD";

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

trait ConfigErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Top-level settings of the `herald` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub logger: LoggerConfig,
    pub workflow: WorkflowConfig,
}

/// Order workflow settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Number of orders placed by a run.
    pub orders: u64,
    /// Root namespace of every workflow event (`<namespace>:created`, ...).
    pub namespace: String,
    /// Orders below this amount are rejected on creation.
    pub min_amount: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self { orders: 3, namespace: "order".to_owned(), min_amount: 1 }
    }
}

/// Loads `T` from a configuration file overlaid with environment variables.
///
/// Sources, lowest priority first:
/// 1. **File**: `path` if given (it must exist), otherwise the optional
///    [`DEFAULT_CONFIG`] file in the working directory. The format follows the
///    extension; a bare name tries every supported extension.
/// 2. **Environment**: variables prefixed with `HERALD__`, nested keys joined
///    by double underscores (`HERALD__LOGGER__LEVEL` maps to `logger.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source
/// cannot be parsed or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use herald_demo::config::{DemoConfig, load_config};
///
/// let cfg: DemoConfig = load_config(None).unwrap_or_default();
/// assert!(!cfg.workflow.namespace.is_empty());
/// ```
pub fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) =
        path.map_or_else(|| (Path::new(DEFAULT_CONFIG), false), |p| (p, true));

    let builder = Config::builder()
        .add_source(File::from(effective_path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
