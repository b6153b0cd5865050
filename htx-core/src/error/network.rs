//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Transport failures, with `reqwest` kept out of the public API.
///
/// ```rust
/// use htx_core::error::NetworkError;
///
/// let err = NetworkError::RequestFailed { status: 502, message: "Bad Gateway".into() };
/// assert!(err.to_string().contains("502"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request failed with a non-success HTTP status.
    #[error("Request failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Payload exceeded a configured size limit.
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        /// Observed or declared size
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Opaque transport error for underlying issues.
    #[error("Transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
