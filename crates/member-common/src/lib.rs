//! # member-common
//!
//! Shared utilities for services that own member records: configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppConfig, AppSettings, ConfigError, Environment, TelemetrySettings};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};

/// Load configuration from the environment and install the tracing subscriber
pub fn init_from_env() -> Result<AppConfig, InitError> {
    let config = AppConfig::from_env()?;
    try_init_tracing_with_config(&config.tracing_config())?;
    tracing::info!(
        app = %config.app.name,
        env = ?config.app.env,
        "Telemetry initialized"
    );
    Ok(config)
}

/// Startup errors
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tracing(#[from] TracingError),
}
