//! # HTX Rust
//!
//! An async Rust SDK for the HTX (formerly Huobi) isolated-margin REST API.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Signature v2**: HMAC-SHA256 or Ed25519 request signing
//! - **Typed API**: Requests and results use `rust_decimal` amounts and typed enums
//! - **Local validation**: Bad input is rejected before any request is sent
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use htx_rust::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = IsolatedMarginService::new(HtxOptions::from_env()?)?;
//!     let info = service
//!         .get_loan_info(&IsolatedMarginLoanInfoRequest::from_symbols(&["btcusdt"]))
//!         .await?;
//!     println!("{info:?}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export core types
pub use htx_core::error::{Error, Result};

// Re-export the client crates
pub use htx_client;
pub use htx_core;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use htx_client::prelude::*;
    pub use htx_core::error::{Error, Result};
}
