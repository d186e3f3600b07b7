//! Tolerant coercion of string-encoded JSON scalars.
//!
//! ffprobe writes most numbers, durations and rates as JSON strings, and
//! leaves out whatever it does not know. Every function here turns one field
//! into a typed `Option`: a missing, `null` or unparseable field is `None`
//! and never an error.
//!
//! The `decode_optional_*` functions read a field out of a JSON object. The
//! [`lenient`] adapters apply the same rules inside serde-derived structs.

use crate::StreamKind;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::time::Duration;

/// Wire format of `creation_time` tags.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Read `key` as a base-10 integer.
pub fn decode_optional_int(container: &Map<String, Value>, key: &str) -> Option<i64> {
    container.get(key).and_then(int_from_value)
}

/// Read `key` as a `SECONDS[.FRACTION]` duration.
pub fn decode_optional_duration(container: &Map<String, Value>, key: &str) -> Option<Duration> {
    container.get(key).and_then(duration_from_value)
}

/// Read `key` as a `NUM/DEN` frame rate.
pub fn decode_optional_frame_rate(container: &Map<String, Value>, key: &str) -> Option<f64> {
    container.get(key).and_then(frame_rate_from_value)
}

/// Read `key` as a wire-format date.
pub fn decode_optional_date(
    container: &Map<String, Value>,
    key: &str,
) -> Option<DateTime<FixedOffset>> {
    container.get(key).and_then(date_from_value)
}

/// Read `key` as text. Non-string values are absent.
pub fn decode_optional_string(container: &Map<String, Value>, key: &str) -> Option<String> {
    container.get(key).and_then(string_from_value)
}

/// Parse a base-10 integer.
pub fn parse_int(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parse `SECONDS` or `SECONDS.FRACTION`.
///
/// The text must read as a finite decimal number. Seconds and fraction are
/// then taken separately; the fraction digits are the sub-second part,
/// truncated to nanoseconds. Signed seconds fall back to zero, seconds that
/// overflow `u64` are absent. Exponent forms such as `1e3` are converted
/// from the float.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if text.contains(|c| c == 'e' || c == 'E') {
        return Duration::try_from_secs_f64(value).ok();
    }

    let mut parts = text.split('.');
    let (secs, fraction) = match (parts.next(), parts.next(), parts.next()) {
        (Some(secs), fraction, None) => (secs, fraction.unwrap_or("")),
        _ => return None,
    };

    let secs = match secs.parse::<u64>() {
        Ok(secs) => secs,
        Err(_) if secs.is_empty() || secs.starts_with('-') => 0,
        Err(_) => return None,
    };
    Some(Duration::new(secs, fraction_nanos(fraction)))
}

/// Parse a `NUM/DEN` rate, or a plain decimal rate.
///
/// Each side of the fraction falls back to zero; a zero denominator yields
/// `None`.
pub fn parse_frame_rate(text: &str) -> Option<f64> {
    let mut parts = text.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(num), Some(den), None) => {
            let num = num.trim().parse::<f64>().unwrap_or(0.0);
            let den = den.trim().parse::<f64>().unwrap_or(0.0);
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        (Some(rate), None, None) => rate.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
        _ => None,
    }
}

/// Parse a `creation_time` such as `2023-11-29T14:41:04.000000Z`.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, WIRE_DATE_FORMAT))
        .ok()
}

/// Name of a JSON value's type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn fraction_nanos(fraction: &str) -> u32 {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    let digits: String = fraction.chars().chain(std::iter::repeat('0')).take(9).collect();
    digits.parse().unwrap_or(0)
}

/// Text form of a scalar; numbers are rendered as written.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn int_from_value(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_int(s),
        _ => None,
    };
    if parsed.is_none() && !value.is_null() {
        tracing::trace!(%value, "discarding non-integer field");
    }
    parsed
}

fn duration_from_value(value: &Value) -> Option<Duration> {
    let parsed = scalar_text(value).and_then(|text| parse_duration(&text));
    if parsed.is_none() && !value.is_null() {
        tracing::trace!(%value, "discarding malformed duration");
    }
    parsed
}

fn frame_rate_from_value(value: &Value) -> Option<f64> {
    let parsed = scalar_text(value).and_then(|text| parse_frame_rate(&text));
    if parsed.is_none() && !value.is_null() {
        tracing::trace!(%value, "discarding malformed frame rate");
    }
    parsed
}

fn date_from_value(value: &Value) -> Option<DateTime<FixedOffset>> {
    let parsed = value.as_str().and_then(parse_date);
    if parsed.is_none() && !value.is_null() {
        tracing::trace!(%value, "discarding malformed date");
    }
    parsed
}

fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            tracing::trace!(value = %other, "discarding non-string text field");
            None
        }
    }
}

fn stream_kind_from_value(value: &Value) -> Option<StreamKind> {
    let parsed = value.as_str().and_then(|s| s.parse().ok());
    if parsed.is_none() && !value.is_null() {
        tracing::debug!(%value, "unrecognized codec type");
    }
    parsed
}

/// `deserialize_with` adapters for derived entity structs.
///
/// Each adapter accepts any JSON value and applies the coercion rules
/// above, so fields must also carry `#[serde(default)]` to cover absence.
pub(crate) mod lenient {
    use super::*;
    use serde::de::{self, DeserializeOwned};
    use serde::{Deserialize, Deserializer};

    fn any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(deserializer)
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(int_from_value))
    }

    pub fn duration<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(duration_from_value))
    }

    pub fn frame_rate<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(frame_rate_from_value))
    }

    pub fn date<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(date_from_value))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(string_from_value))
    }

    pub fn stream_kind<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<StreamKind>, D::Error> {
        Ok(any(deserializer)?.as_ref().and_then(stream_kind_from_value))
    }

    /// A nested object such as `tags`. Anything but an object or `null`
    /// fails the surrounding entity.
    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match any(deserializer)? {
            None => Ok(None),
            Some(value @ Value::Object(_)) => {
                T::deserialize(value).map(Some).map_err(de::Error::custom)
            }
            Some(other) => Err(de::Error::custom(format!(
                "expected an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}
