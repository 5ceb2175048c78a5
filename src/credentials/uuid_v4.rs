//! RFC 4122 version 4 identifiers drawn from an injected random source.

use crate::crypto::random::random_array;
use crate::crypto::SecureRandomSource;
use crate::error::CredentialError;
use uuid::Builder;

/// Generate a lowercase, hyphenated UUID v4 string.
///
/// Byte 6 gets version nibble `0100`, byte 8 gets variant bits `10`; the
/// remaining 122 bits come straight from `source`.
///
/// # Errors
///
/// Returns `RandomSource` if `source` cannot supply 16 bytes.
pub fn new_uuid_v4(source: &dyn SecureRandomSource) -> Result<String, CredentialError> {
    let bytes: [u8; 16] = random_array(source)?;
    let uuid = Builder::from_random_bytes(bytes).into_uuid();
    Ok(uuid.hyphenated().to_string())
}
