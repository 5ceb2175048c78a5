//! Prometheus metrics for credential issuance and token signing.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

/// Credentials generated counter.
pub static CREDENTIALS_GENERATED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "credential_service_credentials_generated_total",
        "Total number of client credentials generated",
        &["status"]
    )
    .expect("Failed to register credentials_generated metric")
});

/// Tokens signed counter.
pub static TOKENS_SIGNED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "credential_service_tokens_signed_total",
        "Total number of access tokens signed",
        &["algorithm", "status"]
    )
    .expect("Failed to register tokens_signed metric")
});

/// Password hash latency histogram.
pub static PASSWORD_HASH_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "credential_service_password_hash_seconds",
        "Client secret hashing latency in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register password_hash_latency metric")
});

/// Record a credential generation attempt.
pub fn record_credential_generated(status: &str) {
    CREDENTIALS_GENERATED.with_label_values(&[status]).inc();
}

/// Record a token signing attempt.
pub fn record_token_signed(algorithm: &str, status: &str) {
    TOKENS_SIGNED.with_label_values(&[algorithm, status]).inc();
}

/// Record client secret hashing latency.
pub fn record_password_hash_latency(duration_secs: f64) {
    PASSWORD_HASH_LATENCY.observe(duration_secs);
}
