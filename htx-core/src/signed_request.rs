//! Building blocks for signed REST requests.
//!
//! HTX signature version 2 signs a canonical payload made of four lines:
//!
//! ```text
//! GET\n
//! api.huobi.pro\n
//! /v1/margin/loan-orders\n
//! AccessKeyId=...&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=2024-01-02T03%3A04%3A05&symbol=btcusdt
//! ```
//!
//! The query line is sorted by key and URL-encoded. The same encoded string is
//! what goes on the wire, so [`build_query_string`] serves both purposes.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods used by signed HTX endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    #[default]
    Get,
    /// Parameters travel in a JSON body; only auth params go in the query.
    Post,
}

impl HttpMethod {
    /// Uppercase method name as it appears in the canonical payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build URL-encoded query string from parameters.
///
/// Parameters are sorted by key (BTreeMap ordering). Values are
/// percent-encoded, keys are emitted as given.
pub fn build_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the canonical payload that is signed for a request.
///
/// `host` is the bare authority (no scheme), lower-cased.
pub fn canonical_payload(
    method: HttpMethod,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.as_str(),
        host.to_ascii_lowercase(),
        path,
        build_query_string(params)
    )
}
