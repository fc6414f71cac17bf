//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use std::env;
use tracing::Level;

use crate::telemetry::TracingConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub telemetry: TelemetrySettings,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub level: Level,
    /// Emit JSON lines instead of the pretty format
    pub json: bool,
}

// Default value functions
fn default_app_name() -> String {
    "member-state".to_string()
}

fn default_level() -> Level {
    Level::INFO
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let level = match lookup("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidValue("LOG_LEVEL", raw))?,
            None => default_level(),
        };

        let json = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => true,
            Some("pretty") => false,
            Some(other) => {
                return Err(ConfigError::InvalidValue("LOG_FORMAT", other.to_string()));
            }
            None => env.is_production(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            telemetry: TelemetrySettings { level, json },
        })
    }

    /// Tracing setup matching these settings
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let base = if self.app.env.is_production() {
            TracingConfig::production()
        } else {
            TracingConfig::development()
        };

        TracingConfig {
            level: self.telemetry.level,
            json: self.telemetry.json,
            ..base
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
