//! JOSE header.

use crate::crypto::SigningAlgorithm;
use serde::{Deserialize, Serialize};

/// JOSE header of a compact JWS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoseHeader {
    /// Signing algorithm
    pub alg: String,
    /// Media type, always `JWT`
    pub typ: String,
}

impl JoseHeader {
    /// Header declaring `algorithm` with `typ=JWT`.
    #[must_use]
    pub fn new(algorithm: SigningAlgorithm) -> Self {
        Self {
            alg: algorithm.as_str().to_string(),
            typ: "JWT".to_string(),
        }
    }
}
