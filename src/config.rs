//! Centralized configuration for the credential service.
//!
//! Values are loaded from environment variables (a `.env` file is honoured)
//! and validated up front. Key derivation itself happens when the service is
//! constructed.

use crate::crypto::HashParams;
use crate::error::CredentialError;
use crate::tracing_config::{LogFormat, TracingConfig};
use std::env;
use std::fmt;
use zeroize::Zeroizing;

/// Default issuer claim for config-driven tokens.
pub const DEFAULT_ISSUER: &str = "credential-service";

/// Default access token lifetime in seconds.
pub const DEFAULT_ACCESS_TOKEN_TTL: i64 = 3600;

/// Credential service configuration.
#[derive(Clone)]
pub struct Config {
    /// Audience bound to the signing key and stamped on credentials
    pub audience: String,
    /// HMAC signing secret
    pub signing_secret: Zeroizing<String>,
    /// JWS algorithm name
    pub jwt_algorithm: String,
    /// Issuer used by `issue_access_token`
    pub jwt_issuer: String,
    /// TTL used by `issue_access_token`, in seconds
    pub access_token_ttl: i64,
    /// Client secret hashing cost
    pub hash_params: HashParams,
    /// Logging configuration
    pub tracing: TracingConfig,
}

impl Config {
    /// Configuration with defaults for everything but audience and secret.
    #[must_use]
    pub fn new(audience: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            signing_secret: Zeroizing::new(signing_secret.into()),
            jwt_algorithm: "HS256".to_string(),
            jwt_issuer: DEFAULT_ISSUER.to_string(),
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            hash_params: HashParams::default(),
            tracing: TracingConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, CredentialError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let audience = required(&lookup, "CLIENT_AUDIENCE")?;
        let signing_secret = required(&lookup, "SIGNING_SECRET")?;

        let mut config = Self::new(audience, signing_secret);
        if let Some(alg) = lookup("JWT_ALGORITHM") {
            config.jwt_algorithm = alg;
        }
        if let Some(issuer) = lookup("JWT_ISSUER") {
            config.jwt_issuer = issuer;
        }
        config.access_token_ttl = parse_var(&lookup, "ACCESS_TOKEN_TTL", DEFAULT_ACCESS_TOKEN_TTL)?;
        if config.access_token_ttl < 0 {
            return Err(CredentialError::config(format!(
                "ACCESS_TOKEN_TTL must not be negative, got {}",
                config.access_token_ttl
            )));
        }

        let defaults = HashParams::default();
        config.hash_params = HashParams {
            memory_kib: parse_var(&lookup, "HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_var(&lookup, "HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_var(&lookup, "HASH_PARALLELISM", defaults.parallelism)?,
        };

        if let Some(level) = lookup("LOG_LEVEL") {
            config.tracing = config.tracing.level(&level)?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.tracing = config.tracing.format(LogFormat::parse(&format)?);
        } else if parse_var(&lookup, "LOG_JSON", false)? {
            config.tracing = config.tracing.format(LogFormat::Json);
        }

        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("audience", &self.audience)
            .field("signing_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("hash_params", &self.hash_params)
            .field("tracing", &self.tracing)
            .finish()
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CredentialError::config(format!("{} is required", name)))
}

/// Parse variable with default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, CredentialError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| CredentialError::config(format!("Invalid {}: {}", name, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "billing-api"),
            ("SIGNING_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.audience, "billing-api");
        assert_eq!(config.signing_secret.as_str(), "s3cret");
        assert_eq!(config.jwt_algorithm, "HS256");
        assert_eq!(config.jwt_issuer, DEFAULT_ISSUER);
        assert_eq!(config.access_token_ttl, 3600);
        assert_eq!(config.hash_params, HashParams::default());
        assert_eq!(config.tracing, TracingConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", "s3cret"),
            ("JWT_ISSUER", "auth.example.com"),
            ("ACCESS_TOKEN_TTL", "900"),
            ("HASH_MEMORY_KIB", "8192"),
            ("HASH_ITERATIONS", "3"),
            ("HASH_PARALLELISM", "2"),
            ("LOG_LEVEL", "debug"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_issuer, "auth.example.com");
        assert_eq!(config.access_token_ttl, 900);
        assert_eq!(config.hash_params.memory_kib, 8192);
        assert_eq!(config.hash_params.iterations, 3);
        assert_eq!(config.hash_params.parallelism, 2);
        assert_eq!(config.tracing.level.to_string(), "debug");
        assert_eq!(config.tracing.format, LogFormat::Json);
    }

    #[test]
    fn test_log_settings_validated() {
        let err = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", "s3cret"),
            ("LOG_LEVEL", "verbose"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CredentialError::Config(_)));

        let config = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", "s3cret"),
            ("LOG_FORMAT", "text"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(config.tracing.format, LogFormat::Text);
    }

    #[test]
    fn test_missing_required() {
        let err = Config::from_lookup(lookup_from(&[("CLIENT_AUDIENCE", "api")])).unwrap_err();
        assert!(matches!(err, CredentialError::Config(_)));

        let err = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, CredentialError::Config(_)));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", "s"),
            ("ACCESS_TOKEN_TTL", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_TTL"));

        let err = Config::from_lookup(lookup_from(&[
            ("CLIENT_AUDIENCE", "api"),
            ("SIGNING_SECRET", "s"),
            ("ACCESS_TOKEN_TTL", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CredentialError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::new("api", "do-not-print");
        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
