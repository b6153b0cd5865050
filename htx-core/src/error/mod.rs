//! # Error Handling for the HTX SDK
//!
//! Every fallible operation in `htx-core` and `htx-client` returns
//! [`Result<T>`], whose error side is the [`Error`] enum below.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error
//! ├── Exchange            - API-level error payload (status "error" / code != 200)
//! ├── Network             - transport failures (via NetworkError)
//! ├── Parse               - malformed or unexpected response JSON (via ParseError)
//! ├── Authentication      - rejected key or signature
//! ├── RateLimit           - throttled, with optional retry hint
//! ├── InvalidRequest      - remote rejected the parameters
//! ├── InvalidArgument     - local input validation failed, no request was sent
//! ├── InsufficientBalance - not enough funds or quota
//! ├── Timeout             - operation timed out
//! └── Context             - another error with an attached description
//! ```
//!
//! `InvalidArgument` is the only variant produced before any network access.
//! All the other variants describe what happened on or after the wire.
//!
//! ## Quick Start
//!
//! ```rust
//! use htx_core::error::{Error, Result, ContextExt};
//!
//! fn repay(order_id: Option<i64>) -> Result<i64> {
//!     let id = order_id.ok_or_else(|| Error::invalid_argument("[Input] orderId should not be null"))?;
//!     submit(id).with_context(|| format!("Failed to repay loan order {id}"))
//! }
//! # fn submit(id: i64) -> Result<i64> { Ok(id) }
//! ```
//!
//! ## Memory Layout
//!
//! Large variants (`Exchange`, `Network`, `Parse`, `Context`) are boxed and
//! string fields use `Cow<'static, str>`, so static messages cost no
//! allocation.

mod config;
mod context;
mod convert;
mod details;
mod network;
mod parse;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

pub use config::{ConfigValidationError, ValidationResult};
pub use context::ContextExt;
pub use details::ExchangeErrorDetails;
pub use network::NetworkError;
pub use parse::ParseError;

/// Result type alias for all SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type of the SDK.
///
/// # Example
///
/// ```rust
/// use htx_core::error::Error;
///
/// let err = Error::authentication("Signature not valid");
/// assert!(err.to_string().contains("Signature not valid"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error payload returned by the HTX API.
    #[error("Exchange error: {0}")]
    Exchange(Box<ExchangeErrorDetails>),

    /// Network-related errors encapsulating transport layer issues.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// Authentication errors (invalid API key, signature, etc.).
    #[error("Authentication error: {0}")]
    Authentication(Cow<'static, str>),

    /// Rate limit exceeded with optional retry information.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message
        message: Cow<'static, str>,
        /// Optional duration to wait before retrying
        retry_after: Option<Duration>,
    },

    /// Request parameters rejected by the remote side.
    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// Caller input rejected locally, before any request was built.
    #[error("Invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// Insufficient balance or loan quota for an operation.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(Cow<'static, str>),

    /// Errors during response parsing.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// Operation timeout.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a new exchange error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use htx_core::error::Error;
    ///
    /// let err = Error::exchange("account-frozen-balance-insufficient-error", "trade account balance is not enough");
    /// ```
    pub fn exchange(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::new(code, message)))
    }

    /// Creates a new exchange error with raw response data.
    pub fn exchange_with_data(
        code: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::with_data(
            code, message, data,
        )))
    }

    /// Creates a new rate limit error with optional retry duration.
    pub fn rate_limit(
        message: impl Into<Cow<'static, str>>,
        retry_after: Option<Duration>,
    ) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates an authentication error.
    pub fn authentication(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a local validation error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use htx_core::error::Error;
    ///
    /// let err = Error::invalid_argument("[Input] symbol should not be null");
    /// assert!(err.is_invalid_argument());
    /// ```
    pub fn invalid_argument(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an insufficient balance error.
    pub fn insufficient_balance(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InsufficientBalance(msg.into())
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Attaches context to an existing error.
    ///
    /// ```rust
    /// use htx_core::error::Error;
    ///
    /// let err = Error::network("Connection refused")
    ///     .context("Failed to fetch loan orders");
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a detailed error report with the full chain.
    ///
    /// ```rust
    /// use htx_core::error::Error;
    ///
    /// let err = Error::network("Connection refused").context("Failed to apply loan");
    /// let report = err.report();
    /// assert!(report.starts_with("Failed to apply loan"));
    /// assert!(report.contains("Caused by: Network error"));
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    /// Checks if repeating the call could succeed (penetrates Context layers).
    ///
    /// The SDK itself never retries; this only informs callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Network(ne) => matches!(
                ne.as_ref(),
                NetworkError::Timeout | NetworkError::ConnectionFailed(_)
            ),
            Error::RateLimit { .. } | Error::Timeout(_) => true,
            _ => false,
        }
    }

    /// Returns `true` when the error was raised by local input validation.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.root_cause(), Error::InvalidArgument(_))
    }

    /// Returns the retry delay if this is a rate limit error (penetrates Context layers).
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.as_rate_limit().and_then(|(_, retry_after)| retry_after)
    }

    /// Returns the message and optional retry duration of a rate limit error.
    #[must_use]
    pub fn as_rate_limit(&self) -> Option<(&str, Option<Duration>)> {
        match self.root_cause() {
            Error::RateLimit {
                message,
                retry_after,
            } => Some((message.as_ref(), *retry_after)),
            _ => None,
        }
    }

    /// Returns the message of an authentication error (penetrates Context layers).
    #[must_use]
    pub fn as_authentication(&self) -> Option<&str> {
        match self.root_cause() {
            Error::Authentication(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns the exchange error details (penetrates Context layers).
    #[must_use]
    pub fn as_exchange(&self) -> Option<&ExchangeErrorDetails> {
        match self.root_cause() {
            Error::Exchange(details) => Some(details.as_ref()),
            _ => None,
        }
    }
}
