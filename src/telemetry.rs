//! Test-time tracing setup

use crate::config::{LogFormat, LoggingSettings, Settings};
use config::ConfigError;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber that writes through the test harness
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is harmless: later calls keep the subscriber already installed
/// and return `false`.
pub fn init_test_tracing(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer();

    match settings.format {
        LogFormat::Compact => builder.compact().try_init().is_ok(),
        LogFormat::Full => builder.try_init().is_ok(),
    }
}

/// Load [`Settings`] and install tracing from their logging section
pub fn init_from_settings() -> Result<bool, ConfigError> {
    let settings = Settings::new()?;
    Ok(init_test_tracing(&settings.logging))
}
