//! Compact JWS assembly.

use crate::error::CredentialError;
use crate::jwt::claims::TokenClaims;
use crate::jwt::header::JoseHeader;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;

/// Unpadded base64url of the JSON encoding of `value`.
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, CredentialError> {
    let json = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// `base64url(header) "." base64url(payload)`.
pub fn signing_input(header: &JoseHeader, claims: &TokenClaims) -> Result<String, CredentialError> {
    Ok(format!("{}.{}", encode_segment(header)?, encode_segment(claims)?))
}

/// Append the signature segment to a signing input.
pub fn assemble(signing_input: &str, signature: &[u8]) -> String {
    format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature))
}

/// Split a compact token and decode header and claims.
///
/// The signature is NOT checked. This is for diagnostics only.
///
/// # Errors
///
/// Returns `Serialization` if the token is not three base64url segments of
/// the expected JSON.
pub fn decode_unverified(token: &str) -> Result<(JoseHeader, TokenClaims), CredentialError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(CredentialError::serialization("Invalid token format"));
    }

    let header = URL_SAFE_NO_PAD
        .decode(parts[0])
        .map_err(|e| CredentialError::serialization(e.to_string()))?;
    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| CredentialError::serialization(e.to_string()))?;

    Ok((serde_json::from_slice(&header)?, serde_json::from_slice(&payload)?))
}
