//! Access token claim set.

use crate::error::CredentialError;
use serde::{Deserialize, Serialize};

/// Access token claim set.
///
/// Field order is the serialized order: `iat`, `nbf`, `exp`, `iss`, `aud`,
/// `scope`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Not-before; always equal to `iat` when issued here
    pub nbf: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issuer supplied by the caller
    pub iss: String,
    /// Audience of the signing key
    pub aud: String,
    /// Granted permissions, in caller order
    pub scope: Vec<String>,
}

impl TokenClaims {
    /// Build claims issued at `now` and valid for `ttl_seconds`.
    ///
    /// A zero TTL yields a token that is already expired (`exp == iat`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a negative TTL or if `now + ttl_seconds`
    /// overflows.
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        scope: Vec<String>,
        now: i64,
        ttl_seconds: i64,
    ) -> Result<Self, CredentialError> {
        if ttl_seconds < 0 {
            return Err(CredentialError::invalid_argument(format!(
                "ttl_seconds must not be negative, got {}",
                ttl_seconds
            )));
        }
        let exp = now.checked_add(ttl_seconds).ok_or_else(|| {
            CredentialError::invalid_argument(format!("ttl_seconds too large: {}", ttl_seconds))
        })?;

        Ok(Self {
            iat: now,
            nbf: now,
            exp,
            iss: issuer.into(),
            aud: audience.into(),
            scope,
        })
    }

    /// Lifetime in seconds, saturating for claims decoded from foreign tokens.
    #[must_use]
    pub const fn ttl_seconds(&self) -> i64 {
        self.exp.saturating_sub(self.iat)
    }

    /// Whether the token is no longer valid at `timestamp`.
    #[must_use]
    pub const fn is_expired_at(&self, timestamp: i64) -> bool {
        timestamp >= self.exp
    }
}
