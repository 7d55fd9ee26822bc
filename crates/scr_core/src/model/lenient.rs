//! Tolerant field decoders for persisted entries.
//!
//! Persisted blobs are only checked at the top level, so individual fields
//! may hold anything JSON allows. These decoders never fail: a value of the
//! wrong type falls back to the field's default.

use crate::model::enrollment::EnrollmentStatus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes `T`, or `T::default()` when the value has the wrong shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Keeps any non-negative whole number (`3`, `3.0`); anything else is `None`.
pub(crate) fn credits<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|number| *number >= 0.0 && number.fract() == 0.0)
            .map(|number| number as u64)
    });
    Ok(whole.and_then(|number| u32::try_from(number).ok()))
}

/// Matches status text ignoring case; unknown values fall back to `active`.
pub(crate) fn status<'de, D>(deserializer: D) -> Result<EnrollmentStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(EnrollmentStatus::parse)
        .unwrap_or_default())
}
