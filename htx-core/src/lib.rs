//! HTX Core Library
//!
//! Exchange-agnostic building blocks shared by the HTX SDK crates:
//!
//! - [`error`]: the SDK [`Error`] type and its parse/network/config sub-errors
//! - [`credentials`]: zeroizing secret holders
//! - [`auth`]: HMAC-SHA256 and Ed25519 signing with Base64 output
//! - [`signed_request`]: canonical payload and query-string encoding
//! - [`http_client`]: a size-limited, timed `reqwest` client
//! - [`parser_utils`]: lenient field readers for JSON payloads
//! - [`time`]: wire formats for timestamps and dates
//! - [`logging`]: `tracing-subscriber` setup
//!
//! # Example
//!
//! ```rust
//! use htx_core::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut params = BTreeMap::new();
//! params.insert("symbol".to_string(), "btcusdt".to_string());
//! let payload = canonical_payload(HttpMethod::Get, "api.huobi.pro", "/v1/margin/accounts/balance", &params);
//! let signature = hmac_sha256_base64(&payload, b"secret").unwrap();
//! assert!(!signature.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]

// Re-exports of external dependencies
pub use rust_decimal;
pub use serde_json;

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod parser_utils;
pub mod signed_request;
pub mod time;

pub use credentials::{SecretBytes, SecretString};
pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::{decode_ed25519_private_key, ed25519_sign_base64, hmac_sha256_base64};
    pub use crate::config::ProxyConfig;
    pub use crate::credentials::{SecretBytes, SecretString};
    pub use crate::error::{ContextExt, Error, ParseError, Result};
    pub use crate::http_client::{HttpClient, HttpConfig};
    pub use crate::signed_request::{HttpMethod, build_query_string, canonical_payload};
    pub use rust_decimal::Decimal;
}
