//! Timestamp codec shared by controls and policies
//!
//! Instants are written as RFC3339 with millisecond precision
//! (`2025-01-02T03:04:05.678Z`). The absent instant is [`ZERO_TIME`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// The instant used when no activation time is known
pub const ZERO_TIME: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Serde default for absent timestamps
#[must_use]
pub const fn zero_time() -> DateTime<Utc> {
    ZERO_TIME
}

/// Whether an instant is the absent instant
#[allow(clippy::trivially_copy_pass_by_ref)]
#[must_use]
pub fn is_zero(time: &DateTime<Utc>) -> bool {
    *time == ZERO_TIME
}

/// Format an instant as RFC3339 with milliseconds
#[must_use]
pub fn format(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize with [`format`]
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(time))
}

/// Deserialize any RFC3339 instant; `null` or an empty string is [`ZERO_TIME`]
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(ZERO_TIME),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}
