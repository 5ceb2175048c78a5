//! Logging setup for the credential service.
//!
//! Levels and output format are validated when configuration is loaded, so a
//! typo in `LOG_LEVEL` fails startup instead of silently logging nothing.
//! `RUST_LOG`, when set, still takes precedence over the configured level.

use crate::credentials::clock::REFERENCE_TIMEZONE;
use crate::error::CredentialError;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to the startup event.
pub const DEFAULT_SERVICE_NAME: &str = "credential-service";

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse `text` or `json`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `Config` for any other value.
    pub fn parse(s: &str) -> Result<Self, CredentialError> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CredentialError::config(format!("unknown log format: {}", s))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Level used when `RUST_LOG` is unset
    pub level: LevelFilter,
    /// Output encoding
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl TracingConfig {
    /// Text output at `info` for `service_name`.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            level: LevelFilter::INFO,
            format: LogFormat::Text,
        }
    }

    /// Set the level from its name (`off`, `error` .. `trace`).
    ///
    /// # Errors
    ///
    /// Returns `Config` if `level` is not a level name.
    pub fn level(mut self, level: &str) -> Result<Self, CredentialError> {
        self.level = LevelFilter::from_str(level)
            .map_err(|_| CredentialError::config(format!("unknown log level: {}", level)))?;
        Ok(self)
    }

    /// Set the output encoding.
    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(self.level.into()))
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `Config` if a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), CredentialError> {
    let registry = tracing_subscriber::registry().with(config.filter());
    let installed = match config.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    installed.map_err(|e| CredentialError::config(format!("tracing init failed: {}", e)))?;

    tracing::info!(
        service = %config.service_name,
        level = %config.level,
        format = ?config.format,
        reference_timezone = REFERENCE_TIMEZONE,
        "Tracing initialized"
    );
    Ok(())
}
