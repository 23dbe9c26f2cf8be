use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix of the environment variables read by [`Settings::new`]
pub const ENV_PREFIX: &str = "KUEUE_TESTKIT";

/// Resource version stamped onto seed objects that carry none
pub const DEFAULT_SEED_RESOURCE_VERSION: u64 = 999;

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `warn` or `kueue_testkit=debug`
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Full,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub seed_resource_version: u64,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed_resource_version: DEFAULT_SEED_RESOURCE_VERSION,
        }
    }
}

impl Settings {
    /// Layer defaults, an optional `config/testkit` file and
    /// `KUEUE_TESTKIT__*` environment variables
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load with `environment` as the highest-priority source
    ///
    /// The `__` separator is applied here, so callers only pick the prefix
    /// and, in tests, the variables themselves.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?
            .set_default("store.seed_resource_version", DEFAULT_SEED_RESOURCE_VERSION)?
            .add_source(File::with_name("config/testkit").required(false))
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}
