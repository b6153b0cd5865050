//! Request parameter container.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Parameters of one signed request, split by where they travel.
///
/// URL parameters go into the query string and are part of the signed
/// payload. Post parameters form the JSON body of POST requests. Values are
/// kept as strings; `None` values are never stored, so unset optional
/// parameters are omitted from the request entirely.
///
/// ```rust
/// use htx_client::UrlParams;
///
/// let params = UrlParams::new()
///     .put_to_url("symbol", "btcusdt")
///     .put_to_url_opt("sub-uid", None::<i64>)
///     .put_to_post("amount", "1.5");
///
/// assert_eq!(params.query().len(), 1);
/// assert_eq!(params.post_body()["amount"], "1.5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    query: BTreeMap<String, String>,
    post: BTreeMap<String, String>,
}

impl UrlParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query-string parameter.
    pub fn put_to_url(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    /// Adds a query-string parameter when `value` is `Some`.
    pub fn put_to_url_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put_to_url(key, value),
            None => self,
        }
    }

    /// Adds a body parameter.
    pub fn put_to_post(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.post.insert(key.into(), value.to_string());
        self
    }

    /// Adds a body parameter when `value` is `Some`.
    pub fn put_to_post_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put_to_post(key, value),
            None => self,
        }
    }

    /// Query-string parameters, sorted by key.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Body parameters, sorted by key.
    pub fn post(&self) -> &BTreeMap<String, String> {
        &self.post
    }

    /// The body parameters as a JSON object of strings.
    pub fn post_body(&self) -> Value {
        let map: Map<String, Value> = self
            .post
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
