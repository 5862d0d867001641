//! Lenient field deserializers.
//!
//! The backend is loosely typed: years arrive as numbers or strings, flags
//! may be `null`, ratings may be floats. Values of an unexpected type are
//! read as "missing" instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string, treating `null` and non-string values as empty.
pub(crate) fn string_or_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Reads an optional string, ignoring values of other types.
pub(crate) fn optional_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Reads an optional boolean, ignoring values of other types.
pub(crate) fn optional_bool<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// Reads a boolean, treating anything but `true` as `false`.
pub(crate) fn bool_or_false<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

/// Reads a release year from a number or a numeric string.
pub(crate) fn year<'de, D>(d: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Reads a star rating; anything outside 1-5 is treated as missing.
pub(crate) fn rating<'de, D>(d: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|r| r.is_finite())
        .map(f64::round)
        .filter(|r| (1.0..=5.0).contains(r))
        .map(|r| r as u8))
}

/// Reads a non-negative, finite number of hours.
pub(crate) fn hours<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw.filter(|h| h.is_finite() && *h >= 0.0))
}
