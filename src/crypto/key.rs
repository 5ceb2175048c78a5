//! Symmetric signing key bound to one audience.

use crate::error::CredentialError;
use ring::hmac;
use std::fmt;

/// JWS algorithm supported by [`KeyMaterial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256
    HS256,
}

impl SigningAlgorithm {
    /// Parse algorithm from its JWS name.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` for any algorithm other than HS256.
    pub fn parse(s: &str) -> Result<Self, CredentialError> {
        match s.to_uppercase().as_str() {
            "HS256" => Ok(Self::HS256),
            _ => Err(CredentialError::key_derivation(format!(
                "Unsupported signing algorithm: {}",
                s
            ))),
        }
    }

    /// Get algorithm name for JWT header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
        }
    }

    fn ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::HS256 => hmac::HMAC_SHA256,
        }
    }
}

/// Intended usage of a key, as carried by the JWK `use` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUse {
    /// Signature generation
    Signature,
}

impl KeyUse {
    /// JWK `use` value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Signature => "sig",
        }
    }
}

/// Immutable HMAC key derived once per (audience, secret) pair.
///
/// The raw key is never exposed; the only capability is producing a MAC over
/// bytes, which is restricted to the crate's token signer.
pub struct KeyMaterial {
    audience: String,
    algorithm: SigningAlgorithm,
    key_use: KeyUse,
    key: hmac::Key,
}

impl KeyMaterial {
    /// Derive an HS256 signing key for `audience` from `secret`.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` if the secret is empty.
    pub fn new(secret: &str, audience: &str) -> Result<Self, CredentialError> {
        Self::with_algorithm(secret, audience, SigningAlgorithm::HS256.as_str())
    }

    /// Derive a signing key for a named algorithm.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` if the secret is empty or the algorithm is
    /// not supported.
    pub fn with_algorithm(
        secret: &str,
        audience: &str,
        algorithm: &str,
    ) -> Result<Self, CredentialError> {
        if secret.is_empty() {
            return Err(CredentialError::key_derivation("signing secret is empty"));
        }
        let algorithm = SigningAlgorithm::parse(algorithm)?;
        let key = hmac::Key::new(algorithm.ring_algorithm(), secret.as_bytes());

        Ok(Self {
            audience: audience.to_string(),
            algorithm,
            key_use: KeyUse::Signature,
            key,
        })
    }

    /// Audience this key is bound to.
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Declared signing algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Declared key usage.
    #[must_use]
    pub const fn key_use(&self) -> KeyUse {
        self.key_use
    }

    /// MAC `data` under this key.
    ///
    /// `declared_alg` is the `alg` value of the header being signed. Anything
    /// other than this key's algorithm is refused rather than producing a
    /// signature the header misdescribes.
    pub(crate) fn sign(&self, declared_alg: &str, data: &[u8]) -> Result<Vec<u8>, CredentialError> {
        if declared_alg != self.algorithm.as_str() {
            return Err(CredentialError::signing(format!(
                "key is bound to {}, header declares {}",
                self.algorithm.as_str(),
                declared_alg
            )));
        }
        Ok(hmac::sign(&self.key, data).as_ref().to_vec())
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("audience", &self.audience)
            .field("algorithm", &self.algorithm)
            .field("key_use", &self.key_use)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
