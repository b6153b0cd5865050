//! Field readers for HTX JSON payloads.
//!
//! HTX sends amounts and rates as decimal strings on some endpoints and as
//! JSON numbers on others, and ids as numbers or numeric strings. These
//! helpers accept both spellings. A present field with an unusable value is
//! an error, an absent or `null` field is `None`.

use crate::error::{ParseError, Result};
use rust_decimal::Decimal;
use serde_json::Value;
use std::borrow::Cow;
use std::str::FromStr;

fn field<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|v| !v.is_null())
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Reads a `Decimal` from a string or number field.
///
/// Empty strings are treated as absent.
///
/// ```
/// use htx_core::parser_utils::parse_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let data = json!({"loan-amount": "100.5", "interest-rate": 0.002});
/// assert_eq!(parse_decimal(&data, "loan-amount").unwrap(), Some(Decimal::new(1005, 1)));
/// assert_eq!(parse_decimal(&data, "interest-rate").unwrap(), Some(Decimal::new(2, 3)));
/// assert_eq!(parse_decimal(&data, "deduct-amount").unwrap(), None);
/// ```
pub fn parse_decimal(data: &Value, key: &str) -> Result<Option<Decimal>> {
    let Some(value) = field(data, key) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => decimal_from_text(s.trim()),
        Value::Number(n) => decimal_from_text(&n.to_string()),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| invalid(key, format!("expected decimal, got {value}")))
}

/// Reads an `i64` from a number or numeric string field.
pub fn parse_i64(data: &Value, key: &str) -> Result<Option<i64>> {
    let Some(value) = field(data, key) else {
        return Ok(None);
    };

    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
        .map(Some)
        .ok_or_else(|| invalid(key, format!("expected integer, got {value}")))
}

/// Reads a string field. Numbers and booleans are rendered as text.
pub fn parse_string(data: &Value, key: &str) -> Option<String> {
    match field(data, key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads an integer from a bare JSON value (a number or numeric string).
pub fn value_as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
}

fn invalid(key: &str, message: String) -> crate::error::Error {
    ParseError::invalid_value(Cow::Owned(key.to_string()), message).into()
}
