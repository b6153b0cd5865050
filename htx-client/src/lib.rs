//! HTX REST client.
//!
//! Signed access to the HTX (formerly Huobi) isolated-margin endpoints,
//! built on `htx-core`.
//!
//! - [`options`] / [`builder`]: credentials, signing mode and HTTP settings
//! - [`auth`]: HMAC-SHA256 and Ed25519 request signers
//! - [`connection`]: the [`RestTransport`] contract and [`HtxRestConnection`]
//! - [`isolated_margin`]: the [`IsolatedMarginService`] façade
//! - [`error`]: mapping of HTX error envelopes
//!
//! # Example
//!
//! ```rust,no_run
//! use htx_client::prelude::*;
//!
//! # async fn example() -> htx_core::Result<()> {
//! let options = HtxOptions::builder()
//!     .api_key("your-access-key")
//!     .secret_key("your-secret-key")
//!     .build()?;
//! let service = IsolatedMarginService::new(options)?;
//!
//! let accounts = service
//!     .get_loan_balance(&IsolatedMarginAccountRequest::new("btcusdt"))
//!     .await?;
//! println!("Found {} isolated margin accounts", accounts.len());
//! # Ok(())
//! # }
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
#![allow(clippy::wildcard_imports)]

// Re-export htx-core
pub use htx_core;

pub mod auth;
pub mod builder;
pub mod connection;
pub mod error;
pub mod isolated_margin;
pub mod options;
pub mod params;
pub mod validation;

pub use builder::HtxOptionsBuilder;
pub use connection::{HtxRestConnection, RestTransport};
pub use isolated_margin::IsolatedMarginService;
pub use options::{HtxOptions, SignatureMethod};
pub use params::UrlParams;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::HtxSigner;
    pub use crate::connection::{HtxRestConnection, RestTransport};
    pub use crate::isolated_margin::{
        IsolatedMarginAccount, IsolatedMarginAccountRequest, IsolatedMarginApplyLoanRequest,
        IsolatedMarginBalance, IsolatedMarginCurrencyInfo, IsolatedMarginLoanInfoRequest,
        IsolatedMarginLoanOrder, IsolatedMarginLoanOrdersRequest, IsolatedMarginRepayLoanRequest,
        IsolatedMarginService, IsolatedMarginSymbolInfo, IsolatedMarginTransferRequest,
        LeveragePositionLimit, LeveragePositionLimitRequest, LoanOrderState,
        MarginTransferDirection, QueryDirection,
    };
    pub use crate::options::{HtxOptions, SignatureMethod};
    pub use crate::params::UrlParams;
    pub use crate::validation::InputChecker;
    pub use crate::HtxOptionsBuilder;
    pub use htx_core::prelude::*;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
