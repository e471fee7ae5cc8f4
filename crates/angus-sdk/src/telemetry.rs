use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogLevel};
use crate::error::{SdkError, SdkErrorKind, SdkResult};

/// Filter for `level`, unless `RUST_LOG` is set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Installs the global fmt subscriber. Fails if one is already installed.
pub fn init(level: LogLevel) -> SdkResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .try_init()
        .map_err(|error| {
            SdkError::new(
                SdkErrorKind::Telemetry,
                format!("failed to install tracing subscriber: {error}"),
            )
        })
}

pub fn init_from_config(config: &AppConfig) -> SdkResult<()> {
    init(config.effective_log_level())?;
    tracing::info!(
        app = %config.name,
        version = %config.version,
        environment = %config.environment,
        "tracing initialized"
    );
    Ok(())
}
