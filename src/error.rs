//! Error taxonomy for credential issuance and token signing.
//!
//! Every failure is terminal for the call that produced it. Nothing here is
//! retried internally, and callers re-invoking an operation get a fresh
//! result rather than a cached one.

use thiserror::Error;

/// Errors produced by the credential service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Signing key could not be derived from the configured secret/algorithm.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Secure randomness was unavailable.
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    /// System clock could not be read.
    #[error("Clock unavailable: {0}")]
    Clock(String),

    /// Key material rejected the signing operation.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Claims or header could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Caller supplied an argument outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Password hashing primitive rejected its input.
    #[error("Hashing failed: {0}")]
    Hashing(String),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

// Stable error codes for transport mapping
/// Code for [`CredentialError::KeyDerivation`].
pub const CREDENTIAL_KEY_DERIVATION: &str = "CREDENTIAL_KEY_DERIVATION";
/// Code for [`CredentialError::RandomSource`].
pub const CREDENTIAL_RANDOM_SOURCE: &str = "CREDENTIAL_RANDOM_SOURCE";
/// Code for [`CredentialError::Clock`].
pub const CREDENTIAL_CLOCK: &str = "CREDENTIAL_CLOCK";
/// Code for [`CredentialError::Signing`].
pub const CREDENTIAL_SIGNING: &str = "CREDENTIAL_SIGNING";
/// Code for [`CredentialError::Serialization`].
pub const CREDENTIAL_SERIALIZATION: &str = "CREDENTIAL_SERIALIZATION";
/// Code for [`CredentialError::InvalidArgument`].
pub const CREDENTIAL_INVALID_ARGUMENT: &str = "CREDENTIAL_INVALID_ARGUMENT";
/// Code for [`CredentialError::Hashing`].
pub const CREDENTIAL_HASHING: &str = "CREDENTIAL_HASHING";
/// Code for [`CredentialError::Config`].
pub const CREDENTIAL_CONFIG: &str = "CREDENTIAL_CONFIG";

impl CredentialError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::KeyDerivation(_) => CREDENTIAL_KEY_DERIVATION,
            Self::RandomSource(_) => CREDENTIAL_RANDOM_SOURCE,
            Self::Clock(_) => CREDENTIAL_CLOCK,
            Self::Signing(_) => CREDENTIAL_SIGNING,
            Self::Serialization(_) => CREDENTIAL_SERIALIZATION,
            Self::InvalidArgument(_) => CREDENTIAL_INVALID_ARGUMENT,
            Self::Hashing(_) => CREDENTIAL_HASHING,
            Self::Config(_) => CREDENTIAL_CONFIG,
        }
    }

    /// Whether the error was caused by caller input rather than the
    /// environment or configuration.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Serialization(_))
    }

    /// No operation in this crate is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Create a key derivation error.
    #[must_use]
    pub fn key_derivation(msg: impl Into<String>) -> Self {
        Self::KeyDerivation(msg.into())
    }

    /// Create a random source error.
    #[must_use]
    pub fn random_source(msg: impl Into<String>) -> Self {
        Self::RandomSource(msg.into())
    }

    /// Create a clock error.
    #[must_use]
    pub fn clock(msg: impl Into<String>) -> Self {
        Self::Clock(msg.into())
    }

    /// Create a signing error.
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a hashing error.
    #[must_use]
    pub fn hashing(msg: impl Into<String>) -> Self {
        Self::Hashing(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<argon2::Error> for CredentialError {
    fn from(err: argon2::Error) -> Self {
        Self::Hashing(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for CredentialError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Hashing(err.to_string())
    }
}
