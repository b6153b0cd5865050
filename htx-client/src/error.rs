//! HTX-specific error handling.
//!
//! HTX answers with HTTP 200 and reports failures in the JSON envelope. Two
//! envelope generations coexist:
//!
//! ```json
//! {"status": "error", "err-code": "api-signature-not-valid", "err-msg": "Signature not valid"}
//! {"code": 1003, "message": "invalid signature", "data": null}
//! ```
//!
//! [`parse_error`] maps either form onto an [`htx_core::Error`].

use htx_core::error::Error;
use htx_core::parser_utils::value_as_i64;
use serde_json::Value;

/// Classified HTX error codes.
///
/// Reference: https://huobiapi.github.io/docs/spot/v1/en/#error-code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtxErrorCode {
    /// Signature rejected (`api-signature-not-valid`, `1003`)
    InvalidSignature,
    /// Unknown or disabled access key (`api-key-invalid`, `1002`)
    InvalidApiKey,
    /// Request needs authentication (`login-required`)
    LoginRequired,
    /// Too many requests (`too-many-request`, `429`)
    TooManyRequests,
    /// Parameter rejected by the server (`invalid-parameter`, `2002`)
    InvalidParameter,
    /// Unknown trading pair (`base-symbol-error`)
    BadSymbol,
    /// Not enough balance or loanable amount
    InsufficientBalance,
    /// Any other code
    Unknown(String),
}

impl HtxErrorCode {
    /// Classifies an HTX error code string.
    ///
    /// v1 codes are dash-separated words, v2 codes are numbers.
    pub fn from_code(code: &str) -> Self {
        let lowered = code.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "1002" => return Self::InvalidApiKey,
            "1003" => return Self::InvalidSignature,
            "429" => return Self::TooManyRequests,
            "2001" | "2002" | "2003" => return Self::InvalidParameter,
            "login-required" => return Self::LoginRequired,
            "too-many-request" | "too-many-requests" => return Self::TooManyRequests,
            "base-symbol-error" | "base-symbol-not-exist" => return Self::BadSymbol,
            _ => {}
        }

        if lowered.contains("signature") {
            Self::InvalidSignature
        } else if lowered.contains("access-key") || lowered.contains("api-key") {
            Self::InvalidApiKey
        } else if lowered.contains("insufficient") || lowered.contains("not-enough") {
            Self::InsufficientBalance
        } else if lowered.contains("invalid")
            || lowered.contains("parameter")
            || lowered.contains("bad-request")
        {
            Self::InvalidParameter
        } else {
            Self::Unknown(code.to_string())
        }
    }
}

/// Returns `true` if an HTX envelope reports a failure.
///
/// A response is an error when `status` is `"error"` or a numeric `code` is
/// present and differs from 200. Envelopes carrying neither marker pass.
///
/// ```rust
/// use htx_client::error::is_error_response;
/// use serde_json::json;
///
/// assert!(is_error_response(&json!({"status": "error", "err-code": "x"})));
/// assert!(is_error_response(&json!({"code": 2002, "message": "bad"})));
/// assert!(!is_error_response(&json!({"status": "ok", "data": 1})));
/// assert!(!is_error_response(&json!({"code": 200, "data": []})));
/// assert!(!is_error_response(&json!({"data": 12345})));
/// ```
pub fn is_error_response(response: &Value) -> bool {
    if response.get("status").and_then(Value::as_str) == Some("error") {
        return true;
    }
    response
        .get("code")
        .and_then(value_as_i64)
        .is_some_and(|code| code != 200)
}

/// Extracts the error code from either envelope form.
pub fn extract_error_code(response: &Value) -> String {
    let code = response.get("err-code").or_else(|| response.get("code"));
    match code {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Extracts the error message from either envelope form.
pub fn extract_error_message(response: &Value) -> &str {
    response
        .get("err-msg")
        .or_else(|| response.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
}

/// Converts an HTX error envelope into an [`Error`].
///
/// ```rust
/// use htx_client::error::parse_error;
/// use serde_json::json;
///
/// let err = parse_error(&json!({
///     "status": "error",
///     "err-code": "api-signature-not-valid",
///     "err-msg": "Signature not valid"
/// }));
/// assert!(err.as_authentication().is_some());
/// ```
pub fn parse_error(response: &Value) -> Error {
    let code = extract_error_code(response);
    let msg = extract_error_message(response).to_string();

    match HtxErrorCode::from_code(&code) {
        HtxErrorCode::InvalidSignature
        | HtxErrorCode::InvalidApiKey
        | HtxErrorCode::LoginRequired => Error::authentication(msg),
        HtxErrorCode::TooManyRequests => Error::rate_limit(msg, None),
        HtxErrorCode::InvalidParameter | HtxErrorCode::BadSymbol => Error::invalid_request(msg),
        HtxErrorCode::InsufficientBalance => Error::insufficient_balance(msg),
        HtxErrorCode::Unknown(_) => Error::exchange_with_data(code, msg, response.clone()),
    }
}
