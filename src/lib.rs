//! Credential Service library.
//!
//! Mints unique client credentials (credential id, UUID v4 client id,
//! salted secret hash) and signs short-lived HS256 access tokens for a
//! single trusted audience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod jwt;
pub mod metrics;
pub mod service;
pub mod tracing_config;

// Re-exports for convenience
pub use config::Config;
pub use credentials::ClientCredential;
pub use error::CredentialError;
pub use service::CredentialService;
