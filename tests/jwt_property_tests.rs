//! Property-based tests for access token signing.
//!
//! Property 1: Compact Structure
//! Property 2: Claim Layout
//! Property 3: External Verifier Acceptance
//! Property 4: Tamper Detection

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use credential_service::credentials::Clock;
use credential_service::jwt::{decode_unverified, TokenClaims};
use credential_service::{CredentialError, CredentialService};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use proptest::prelude::*;
use std::sync::Arc;

const SECRET: &str = "test-secret-key-for-property-testing-32b";
const AUDIENCE: &str = "billing-api";

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now(&self) -> Result<DateTime<Utc>, CredentialError> {
        DateTime::from_timestamp(self.0, 0).ok_or_else(|| CredentialError::clock("out of range"))
    }
}

fn service() -> CredentialService {
    CredentialService::new(AUDIENCE, SECRET).unwrap()
}

fn service_at(now: i64) -> CredentialService {
    CredentialService::builder(AUDIENCE, SECRET)
        .clock(Arc::new(FixedClock(now)))
        .build()
        .unwrap()
}

fn verify(token: &str, secret: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUDIENCE]);
    validation.validate_nbf = true;
    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}

fn segment_json(segment: &str) -> serde_json::Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Generate arbitrary issuer strings.
fn arb_issuer() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.:/-]{0,63}"
}

/// Generate arbitrary scope lists, including unicode and JSON metacharacters.
fn arb_scope() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,16}(:[a-z]{1,8})?",
            Just("quote\"and\\slash".to_string()),
            Just("ação".to_string()),
        ],
        0..10,
    )
}

/// Generate arbitrary TTL (1 minute to 24 hours).
fn arb_ttl() -> impl Strategy<Value = i64> {
    60i64..86400i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Compact Structure
    ///
    /// Exactly three non-empty unpadded base64url segments.
    #[test]
    fn prop_compact_structure(issuer in arb_issuer(), ttl in arb_ttl(), scope in arb_scope()) {
        let token = service().sign(&issuer, ttl, &scope).unwrap();

        prop_assert_eq!(token.matches('.').count(), 2);
        for segment in token.split('.') {
            prop_assert!(!segment.is_empty());
            prop_assert!(!segment.contains('='));
            prop_assert!(URL_SAFE_NO_PAD.decode(segment).is_ok());
        }
    }

    /// Property 2: Claim Layout
    ///
    /// aud is fixed, nbf == iat, exp - iat == ttl, scope order preserved.
    #[test]
    fn prop_claim_layout(
        issuer in arb_issuer(),
        ttl in arb_ttl(),
        scope in arb_scope(),
        now in 1_600_000_000i64..2_000_000_000i64,
    ) {
        let token = service_at(now).sign(&issuer, ttl, &scope).unwrap();
        let (_, claims) = decode_unverified(&token).unwrap();

        prop_assert_eq!(&claims.aud, AUDIENCE);
        prop_assert_eq!(claims.iat, now);
        prop_assert_eq!(claims.nbf, claims.iat);
        prop_assert_eq!(claims.exp - claims.iat, ttl);
        prop_assert_eq!(&claims.iss, &issuer);
        prop_assert_eq!(&claims.scope, &scope);
    }

    /// Property 3: External Verifier Acceptance
    #[test]
    fn prop_verifier_accepts(issuer in arb_issuer(), ttl in arb_ttl(), scope in arb_scope()) {
        let token = service().sign(&issuer, ttl, &scope).unwrap();
        let claims = verify(&token, SECRET).unwrap();

        prop_assert_eq!(&claims.iss, &issuer);
        prop_assert_eq!(&claims.scope, &scope);
    }

    /// Property 4: Tamper Detection
    ///
    /// Flipping any payload character invalidates the signature.
    #[test]
    fn prop_tampered_payload_rejected(index in any::<prop::sample::Index>()) {
        let token = service().sign("svc", 3600, &["read", "write"]).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let i = index.index(payload.len());
        payload[i] ^= 0x01;
        let forged = format!("{}.{}.{}", parts[0], URL_SAFE_NO_PAD.encode(&payload), parts[2]);

        prop_assert!(verify(&forged, SECRET).is_err());
    }
}

#[test]
fn test_reference_scenario() {
    let token = service().sign("svc", 3600, &["read", "write"]).unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let header = segment_json(parts[0]);
    assert_eq!(header, serde_json::json!({"alg": "HS256", "typ": "JWT"}));

    let payload = segment_json(parts[1]);
    assert_eq!(payload["aud"], AUDIENCE);
    assert_eq!(payload["iss"], "svc");
    assert_eq!(
        payload["exp"].as_i64().unwrap() - payload["iat"].as_i64().unwrap(),
        3600
    );
    assert_eq!(payload["nbf"], payload["iat"]);
    assert_eq!(payload["scope"], serde_json::json!(["read", "write"]));
}

#[test]
fn test_payload_key_order() {
    let token = service_at(1_700_000_000).sign("svc", 60, &["read"]).unwrap();
    let payload = URL_SAFE_NO_PAD.decode(token.split('.').nth(1).unwrap()).unwrap();
    assert_eq!(
        String::from_utf8(payload).unwrap(),
        r#"{"iat":1700000000,"nbf":1700000000,"exp":1700000060,"iss":"svc","aud":"billing-api","scope":["read"]}"#
    );
}

#[test]
fn test_zero_ttl_issues_expired_token() {
    let token = service_at(1_700_000_000).sign("svc", 0, &["read"]).unwrap();
    let (_, claims) = decode_unverified(&token).unwrap();
    assert_eq!(claims.exp, claims.iat);
    assert_eq!(claims.nbf, claims.iat);
}

#[test]
fn test_negative_ttl_rejected() {
    let err = service().sign("svc", -1, &["read"]).unwrap_err();
    assert!(matches!(err, CredentialError::InvalidArgument(_)));
    assert!(err.is_caller_error());
}

#[test]
fn test_wrong_secret_rejected() {
    let token = service().sign("svc", 3600, &["read"]).unwrap();
    assert!(verify(&token, "some-other-secret").is_err());
}

#[test]
fn test_audience_not_caller_overridable() {
    let other = CredentialService::new("other-api", SECRET).unwrap();
    let token = other.sign("svc", 3600, &["read"]).unwrap();
    let (_, claims) = decode_unverified(&token).unwrap();
    assert_eq!(claims.aud, "other-api");
    assert!(verify(&token, SECRET).is_err());
}

#[test]
fn test_audience_bound_per_instance() {
    let a = CredentialService::builder("a", SECRET)
        .clock(Arc::new(FixedClock(10)))
        .build()
        .unwrap();
    let b = CredentialService::builder("b", SECRET)
        .clock(Arc::new(FixedClock(10)))
        .build()
        .unwrap();

    let ta = a.sign("svc", 60, &["read"]).unwrap();
    let tb = b.sign("svc", 60, &["read"]).unwrap();
    assert_ne!(ta, tb);
    assert_ne!(ta.split('.').nth(1), tb.split('.').nth(1));
}
