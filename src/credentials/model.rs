use serde::{Deserialize, Serialize};
use std::fmt;

/// Freshly issued client credential.
///
/// Ownership passes to the caller; the generator keeps no copy.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredential {
    /// Time + random derived issuance identifier.
    pub credential_id: String,
    /// Unix timestamp of issuance, stamped in the reference timezone.
    pub credential_time: i64,
    /// Audience of the issuing service.
    pub client_aud: String,
    /// UUID v4 client identifier.
    pub client_id: String,
    /// Base64 of the salted hash of the issuance composite.
    pub client_secret: String,
}

impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("credential_id", &self.credential_id)
            .field("credential_time", &self.credential_time)
            .field("client_aud", &self.client_aud)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
