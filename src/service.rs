//! Service facade owning one audience's key material.

use crate::config::Config;
use crate::credentials::{ClientCredential, Clock, CredentialGenerator, SystemClock};
use crate::crypto::{
    Argon2Hasher, HashParams, KeyMaterial, OsRandom, PasswordHasher, SecureRandomSource,
    SigningAlgorithm,
};
use crate::error::CredentialError;
use crate::jwt::TokenSigner;
use std::sync::Arc;
use tracing::info;

/// Issues client credentials and signs access tokens for one audience.
///
/// Multiple audiences need multiple independent instances.
#[derive(Clone)]
pub struct CredentialService {
    generator: CredentialGenerator,
    signer: TokenSigner,
    default_issuer: String,
    default_ttl: i64,
}

impl CredentialService {
    /// Construct with production capabilities and default settings.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` if `secret` is empty.
    pub fn new(audience: &str, secret: &str) -> Result<Self, CredentialError> {
        Self::builder(audience, secret).build()
    }

    /// Construct from a loaded [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` for an empty secret or unsupported algorithm,
    /// and `Hashing` for out-of-range hash parameters.
    pub fn from_config(config: &Config) -> Result<Self, CredentialError> {
        Self::builder(&config.audience, &config.signing_secret)
            .algorithm(&config.jwt_algorithm)
            .hash_params(config.hash_params)?
            .default_issuer(&config.jwt_issuer)
            .default_ttl(config.access_token_ttl)
            .build()
    }

    /// Start building a service with substitutable capabilities.
    #[must_use]
    pub fn builder(audience: &str, secret: &str) -> CredentialServiceBuilder {
        CredentialServiceBuilder::new(audience, secret)
    }

    /// Audience of this service.
    #[must_use]
    pub fn audience(&self) -> &str {
        self.signer.audience()
    }

    /// Issue a fresh client credential.
    ///
    /// # Errors
    ///
    /// See [`CredentialGenerator::generate`].
    pub fn generate(&self) -> Result<ClientCredential, CredentialError> {
        self.generator.generate()
    }

    /// Sign a compact JWT for `issuer` valid for `ttl_seconds` with `scope`.
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::sign`].
    pub fn sign<S: AsRef<str>>(
        &self,
        issuer: &str,
        ttl_seconds: i64,
        scope: &[S],
    ) -> Result<String, CredentialError> {
        self.signer.sign(issuer, ttl_seconds, scope)
    }

    /// Sign with the configured issuer and TTL.
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::sign`].
    pub fn issue_access_token<S: AsRef<str>>(&self, scope: &[S]) -> Result<String, CredentialError> {
        self.signer.sign(&self.default_issuer, self.default_ttl, scope)
    }
}

/// Builder for [`CredentialService`].
pub struct CredentialServiceBuilder {
    audience: String,
    secret: zeroize::Zeroizing<String>,
    algorithm: String,
    random: Arc<dyn SecureRandomSource>,
    hasher: Option<Arc<dyn PasswordHasher>>,
    clock: Arc<dyn Clock>,
    default_issuer: String,
    default_ttl: i64,
}

impl CredentialServiceBuilder {
    fn new(audience: &str, secret: &str) -> Self {
        Self {
            audience: audience.to_string(),
            secret: zeroize::Zeroizing::new(secret.to_string()),
            algorithm: SigningAlgorithm::HS256.as_str().to_string(),
            random: Arc::new(OsRandom),
            hasher: None,
            clock: Arc::new(SystemClock),
            default_issuer: crate::config::DEFAULT_ISSUER.to_string(),
            default_ttl: crate::config::DEFAULT_ACCESS_TOKEN_TTL,
        }
    }

    /// Set the signing algorithm name.
    #[must_use]
    pub fn algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = algorithm.to_string();
        self
    }

    /// Substitute the randomness source.
    #[must_use]
    pub fn random_source(mut self, random: Arc<dyn SecureRandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Substitute the password hasher.
    #[must_use]
    pub fn password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Use Argon2id with the given cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `Hashing` if the parameters are outside Argon2's limits.
    pub fn hash_params(mut self, params: HashParams) -> Result<Self, CredentialError> {
        self.hasher = Some(Arc::new(Argon2Hasher::new(params)?));
        Ok(self)
    }

    /// Substitute the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the issuer used by `issue_access_token`.
    #[must_use]
    pub fn default_issuer(mut self, issuer: &str) -> Self {
        self.default_issuer = issuer.to_string();
        self
    }

    /// Set the TTL used by `issue_access_token`.
    #[must_use]
    pub fn default_ttl(mut self, ttl_seconds: i64) -> Self {
        self.default_ttl = ttl_seconds;
        self
    }

    /// Derive the key and assemble the service.
    ///
    /// # Errors
    ///
    /// Returns `KeyDerivation` for an empty secret or unsupported algorithm.
    pub fn build(self) -> Result<CredentialService, CredentialError> {
        let key = Arc::new(KeyMaterial::with_algorithm(
            &self.secret,
            &self.audience,
            &self.algorithm,
        )?);
        let hasher = self
            .hasher
            .unwrap_or_else(|| Arc::new(Argon2Hasher::default()));

        info!(
            audience = %self.audience,
            algorithm = key.algorithm().as_str(),
            key_use = key.key_use().as_str(),
            "Credential service initialized"
        );

        Ok(CredentialService {
            generator: CredentialGenerator::with_capabilities(
                self.audience,
                self.random,
                hasher,
                Arc::clone(&self.clock),
            ),
            signer: TokenSigner::with_clock(key, self.clock),
            default_issuer: self.default_issuer,
            default_ttl: self.default_ttl,
        })
    }
}
