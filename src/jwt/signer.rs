//! HS256 access token signing.

use crate::credentials::clock::{Clock, SystemClock};
use crate::crypto::KeyMaterial;
use crate::error::CredentialError;
use crate::jwt::claims::TokenClaims;
use crate::jwt::header::JoseHeader;
use crate::jwt::serializer;
use crate::metrics;
use std::sync::Arc;
use tracing::{debug, warn};

/// Signs scope-bounded access tokens for the audience bound to its key.
#[derive(Clone)]
pub struct TokenSigner {
    key: Arc<KeyMaterial>,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    /// Signer reading time from the system clock.
    #[must_use]
    pub fn new(key: Arc<KeyMaterial>) -> Self {
        Self::with_clock(key, Arc::new(SystemClock))
    }

    /// Signer with an explicit clock.
    #[must_use]
    pub fn with_clock(key: Arc<KeyMaterial>, clock: Arc<dyn Clock>) -> Self {
        Self { key, clock }
    }

    /// Audience every token is issued for.
    #[must_use]
    pub fn audience(&self) -> &str {
        self.key.audience()
    }

    /// Sign a token for `issuer` valid for `ttl_seconds` carrying `scope`.
    ///
    /// Scope order is preserved. The audience always comes from the key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a negative or overflowing TTL, `Clock`
    /// if time cannot be read, `Serialization` if the claims cannot be
    /// encoded and `Signing` if the key refuses the header's algorithm.
    pub fn sign<S: AsRef<str>>(
        &self,
        issuer: &str,
        ttl_seconds: i64,
        scope: &[S],
    ) -> Result<String, CredentialError> {
        let algorithm = self.key.algorithm().as_str();
        match self.build(issuer, ttl_seconds, scope) {
            Ok(token) => {
                metrics::record_token_signed(algorithm, "success");
                debug!(
                    issuer,
                    audience = self.key.audience(),
                    ttl_seconds,
                    scope_count = scope.len(),
                    "Access token signed"
                );
                Ok(token)
            }
            Err(e) => {
                metrics::record_token_signed(algorithm, "failure");
                warn!(code = e.code(), error = %e, issuer, "Access token signing failed");
                Err(e)
            }
        }
    }

    fn build<S: AsRef<str>>(
        &self,
        issuer: &str,
        ttl_seconds: i64,
        scope: &[S],
    ) -> Result<String, CredentialError> {
        let now = self.clock.now()?.timestamp();
        let scope = scope.iter().map(|s| s.as_ref().to_string()).collect();
        let claims = TokenClaims::new(issuer, self.key.audience(), scope, now, ttl_seconds)?;
        self.sign_claims(&claims)
    }

    fn sign_claims(&self, claims: &TokenClaims) -> Result<String, CredentialError> {
        let header = JoseHeader::new(self.key.algorithm());
        let signing_input = serializer::signing_input(&header, claims)?;
        let signature = self.key.sign(&header.alg, signing_input.as_bytes())?;
        Ok(serializer::assemble(&signing_input, &signature))
    }
}
