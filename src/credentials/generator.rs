//! Client credential construction.

use crate::credentials::clock::{in_reference_zone, Clock, SystemClock};
use crate::credentials::model::ClientCredential;
use crate::credentials::uuid_v4::new_uuid_v4;
use crate::crypto::random::{random_array, to_hex};
use crate::crypto::{Argon2Hasher, OsRandom, PasswordHasher, SecureRandomSource};
use crate::error::CredentialError;
use crate::metrics;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Random bytes appended to every credential id (80 bits).
pub const CREDENTIAL_ID_RANDOM_BYTES: usize = 10;

/// Produces fresh [`ClientCredential`]s for one audience.
///
/// Holds no mutable state; concurrent calls need no coordination.
#[derive(Clone)]
pub struct CredentialGenerator {
    audience: String,
    random: Arc<dyn SecureRandomSource>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl CredentialGenerator {
    /// Generator backed by the OS CSPRNG, default Argon2id and the system clock.
    #[must_use]
    pub fn new(audience: impl Into<String>) -> Self {
        Self::with_capabilities(
            audience,
            Arc::new(OsRandom),
            Arc::new(Argon2Hasher::default()),
            Arc::new(SystemClock),
        )
    }

    /// Generator with explicit randomness, hashing and clock capabilities.
    #[must_use]
    pub fn with_capabilities(
        audience: impl Into<String>,
        random: Arc<dyn SecureRandomSource>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audience: audience.into(),
            random,
            hasher,
            clock,
        }
    }

    /// Audience stamped on every credential.
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Issue a new credential.
    ///
    /// # Errors
    ///
    /// Returns `Clock` if the clock cannot be read, `RandomSource` if secure
    /// randomness is unavailable, or `Hashing` if the hasher rejects its input.
    pub fn generate(&self) -> Result<ClientCredential, CredentialError> {
        match self.build() {
            Ok(credential) => {
                metrics::record_credential_generated("success");
                debug!(
                    credential_id = %credential.credential_id,
                    client_id = %credential.client_id,
                    audience = %self.audience,
                    "Client credential generated"
                );
                Ok(credential)
            }
            Err(e) => {
                metrics::record_credential_generated("failure");
                warn!(code = e.code(), error = %e, "Client credential generation failed");
                Err(e)
            }
        }
    }

    fn build(&self) -> Result<ClientCredential, CredentialError> {
        let now = self.clock.now()?;
        let suffix: [u8; CREDENTIAL_ID_RANDOM_BYTES] = random_array(self.random.as_ref())?;
        let credential_id = format_credential_id(now, &suffix);
        let credential_time = in_reference_zone(now)?.timestamp();
        let client_id = new_uuid_v4(self.random.as_ref())?;

        let plaintext = Zeroizing::new(compose_secret_plaintext(
            &self.audience,
            &client_id,
            credential_time,
            &credential_id,
        ));
        let mut salt = Zeroizing::new(vec![0u8; self.hasher.salt_len()]);
        self.random.fill(&mut salt)?;

        let started = Instant::now();
        let hash = self.hasher.hash(&plaintext, &salt)?;
        metrics::record_password_hash_latency(started.elapsed().as_secs_f64());

        Ok(ClientCredential {
            credential_id,
            credential_time,
            client_aud: self.audience.clone(),
            client_id,
            client_secret: STANDARD.encode(hash),
        })
    }
}

/// `<secs>.<micros>.<hex suffix>`; micros are zero-padded to six digits.
pub fn format_credential_id(now: DateTime<Utc>, suffix: &[u8]) -> String {
    format!(
        "{}.{:06}.{}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        to_hex(suffix)
    )
}

/// Composite plaintext binding a secret to one issuance event.
pub fn compose_secret_plaintext(
    audience: &str,
    client_id: &str,
    credential_time: i64,
    credential_id: &str,
) -> String {
    format!("{}#{}#{}%{}", audience, client_id, credential_time, credential_id)
}
