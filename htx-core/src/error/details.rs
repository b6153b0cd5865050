//! Structured details for API error payloads.

use serde_json::Value;

/// Details of an error payload returned by the HTX API.
///
/// `code` holds `err-code` for v1 endpoints and the numeric `code` for v2
/// endpoints, both as strings.
///
/// ```rust
/// use htx_core::error::ExchangeErrorDetails;
///
/// let details = ExchangeErrorDetails::new("invalid-amount", "amount is invalid");
/// assert_eq!(details.code, "invalid-amount");
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct ExchangeErrorDetails {
    /// `err-code` (v1) or `code` (v2) as a string.
    pub code: String,
    /// `err-msg` (v1) or `message` (v2).
    pub message: String,
    /// Optional raw response data for debugging.
    pub data: Option<Value>,
}

impl ExchangeErrorDetails {
    /// Creates a new `ExchangeErrorDetails` with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Creates a new `ExchangeErrorDetails` with raw response data.
    pub fn with_data(code: impl Into<String>, message: impl Into<String>, data: Value) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for ExchangeErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}
