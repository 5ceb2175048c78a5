//! Wall-clock capability and the reference business timezone.

use crate::error::CredentialError;
use chrono::{DateTime, FixedOffset, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// IANA name of the timezone credential timestamps are stamped in.
///
/// Unix timestamps are offset-independent, so consumers expecting UTC seconds
/// can use `credential_time` as-is; consumers rendering local business time
/// must convert from this zone.
pub const REFERENCE_TIMEZONE: &str = "America/Sao_Paulo";

/// UTC offset of [`REFERENCE_TIMEZONE`] (no DST since 2019).
pub const REFERENCE_UTC_OFFSET_SECONDS: i32 = -3 * 3600;

/// Source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    /// Current instant with sub-second precision.
    fn now(&self) -> Result<DateTime<Utc>, CredentialError>;
}

/// Host system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>, CredentialError> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CredentialError::clock(format!("system time before Unix epoch: {}", e)))?;
        let secs = i64::try_from(since_epoch.as_secs())
            .map_err(|_| CredentialError::clock("system time out of range"))?;
        DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
            .ok_or_else(|| CredentialError::clock("system time out of range"))
    }
}

/// Fixed offset for the reference timezone.
pub fn reference_offset() -> Result<FixedOffset, CredentialError> {
    FixedOffset::east_opt(REFERENCE_UTC_OFFSET_SECONDS)
        .ok_or_else(|| CredentialError::clock("invalid reference timezone offset"))
}

/// `instant` as observed in the reference timezone.
pub fn in_reference_zone(instant: DateTime<Utc>) -> Result<DateTime<FixedOffset>, CredentialError> {
    Ok(instant.with_timezone(&reference_offset()?))
}
