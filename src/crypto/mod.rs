//! Key material and the injectable cryptographic capabilities.

pub mod hasher;
pub mod key;
pub mod random;

pub use hasher::{Argon2Hasher, HashParams, PasswordHasher};
pub use key::{KeyMaterial, KeyUse, SigningAlgorithm};
pub use random::{OsRandom, SecureRandomSource};
