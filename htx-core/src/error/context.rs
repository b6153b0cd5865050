//! Context attachment for `Result` and `Option`.

use crate::error::{Error, ParseError, Result};
use std::fmt;

/// Extension trait for attaching a description to a failure.
///
/// On a `Result`, the error is wrapped in [`Error::Context`]. On an `Option`,
/// `None` becomes a [`ParseError::MissingField`] carrying the context text,
/// which is how absent response fields are reported.
///
/// ```rust
/// use htx_core::error::{ContextExt, Result};
///
/// fn loan_order_id(json: &serde_json::Value) -> Result<i64> {
///     json.get("data")
///         .and_then(serde_json::Value::as_i64)
///         .context("data")
/// }
///
/// assert_eq!(loan_order_id(&serde_json::json!({"data": 7})).unwrap(), 7);
/// assert!(loan_order_id(&serde_json::json!({})).is_err());
/// ```
pub trait ContextExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds lazily built context to an error.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ContextExt<T, E> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f().to_string()))
    }
}

impl<T> ContextExt<T, Error> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| ParseError::missing_field_owned(context.to_string()).into())
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| ParseError::missing_field_owned(f().to_string()).into())
    }
}
