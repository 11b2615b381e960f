//! Timestamp normalization.

use chrono::{DateTime, Utc};

use crate::store::FieldValue;

/// Coerces a stored value into a date.
///
/// Store timestamps convert directly, dates pass through, numbers are epoch
/// milliseconds. Anything else, absence included, yields `now`.
#[must_use]
pub fn normalize(value: Option<&FieldValue>, now: DateTime<Utc>) -> DateTime<Utc> {
    let resolved = match value {
        Some(FieldValue::Timestamp(ts)) => ts.to_date(),
        Some(FieldValue::Date(date)) => Some(*date),
        Some(FieldValue::Integer(millis)) => DateTime::from_timestamp_millis(*millis),
        Some(FieldValue::Float(millis)) if millis.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let millis = millis.trunc() as i64;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    };

    resolved.unwrap_or(now)
}
