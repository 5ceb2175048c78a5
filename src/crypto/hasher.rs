//! Slow, salted one-way hashing for client secrets.

use crate::error::CredentialError;
use argon2::password_hash::{PasswordHasher as _, Salt, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Default salt length in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Largest raw salt whose unpadded base64 still fits a PHC salt field.
const MAX_ENCODABLE_SALT_LEN: usize = Salt::MAX_LENGTH / 4 * 3;

/// Adaptive-cost password hashing capability.
///
/// The salt is supplied by the caller so that all entropy flows through a
/// single [`SecureRandomSource`](super::SecureRandomSource).
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with `salt`, returning a self-describing hash string
    /// that embeds the salt and cost parameters.
    fn hash(&self, plaintext: &str, salt: &[u8]) -> Result<String, CredentialError>;

    /// Number of salt bytes this hasher expects.
    fn salt_len(&self) -> usize {
        DEFAULT_SALT_LEN
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `Hashing` if the parameters are outside Argon2's limits.
    pub fn new(params: HashParams) -> Result<Self, CredentialError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str, salt: &[u8]) -> Result<String, CredentialError> {
        let max = argon2::MAX_SALT_LEN.min(MAX_ENCODABLE_SALT_LEN);
        if salt.len() < argon2::MIN_SALT_LEN || salt.len() > max {
            return Err(CredentialError::hashing(format!(
                "salt must be {}..={} bytes, got {}",
                argon2::MIN_SALT_LEN,
                max,
                salt.len()
            )));
        }
        let salt = SaltString::encode_b64(salt)?;
        let hash = self.argon2.hash_password(plaintext.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}
