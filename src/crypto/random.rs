//! Secure randomness capability.

use crate::error::CredentialError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Source of cryptographically secure random bytes.
///
/// Production code uses [`OsRandom`]; tests may substitute a deterministic
/// or failing source.
pub trait SecureRandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CredentialError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CredentialError::random_source(e.to_string()))
    }
}

/// Draw `N` random bytes from `source`.
pub(crate) fn random_array<const N: usize>(
    source: &dyn SecureRandomSource,
) -> Result<[u8; N], CredentialError> {
    let mut bytes = [0u8; N];
    source.fill(&mut bytes)?;
    Ok(bytes)
}

/// Lowercase hex encoding.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
