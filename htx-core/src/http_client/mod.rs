//! HTTP client used by the REST connection.
//!
//! A thin layer over `reqwest` that adds:
//! - one overall timeout per request
//! - request and response body size limits
//! - mapping of HTTP status codes onto [`crate::error::Error`]
//! - `tracing` spans around every request
//!
//! Requests are sent exactly once. Nothing in this module retries.
//!
//! ```rust,no_run
//! use htx_core::http_client::{HttpClient, HttpConfig};
//!
//! # async fn run() -> htx_core::Result<()> {
//! let client = HttpClient::new(HttpConfig::default())?;
//! let response = client.get("https://api.huobi.pro/v1/common/timestamp", None).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod request;
mod response;


pub use builder::HttpClient;
pub use config::HttpConfig;
