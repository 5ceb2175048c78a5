//! Access token claims, compact serialization and HS256 signing.

pub mod claims;
pub mod header;
pub mod serializer;
pub mod signer;

pub use claims::TokenClaims;
pub use header::JoseHeader;
pub use serializer::decode_unverified;
pub use signer::TokenSigner;
