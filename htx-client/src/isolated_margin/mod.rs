//! Isolated-margin REST API.
//!
//! [`IsolatedMarginService`] validates each request locally, maps it onto the
//! endpoint's query or body parameters, performs one signed call through its
//! [`RestTransport`] and parses `data` into typed results.
//!
//! # Example
//!
//! ```no_run
//! use htx_client::isolated_margin::{
//!     IsolatedMarginService, IsolatedMarginTransferRequest, MarginTransferDirection,
//! };
//! use htx_client::HtxOptions;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> htx_core::Result<()> {
//! let service = IsolatedMarginService::new(HtxOptions::from_env()?)?;
//! let transfer_id = service
//!     .transfer(&IsolatedMarginTransferRequest::new(
//!         MarginTransferDirection::SpotToMargin,
//!         "btcusdt",
//!         "usdt",
//!         dec!(100),
//!     ))
//!     .await?;
//! println!("transfer {transfer_id}");
//! # Ok(())
//! # }
//! ```

pub mod parser;
mod types;

pub use types::*;

use crate::connection::{HtxRestConnection, RestTransport};
use crate::options::HtxOptions;
use crate::params::UrlParams;
use crate::validation::InputChecker;
use htx_core::error::{Error, ParseError, Result};
use htx_core::parser_utils::value_as_i64;
use htx_core::time::format_query_date;
use serde_json::Value;
use tracing::{debug, instrument};

/// Spot to isolated-margin transfer.
pub const TRANSFER_TO_MARGIN_PATH: &str = "/v1/dw/transfer-in/margin";
/// Isolated-margin to spot transfer.
pub const TRANSFER_TO_SPOT_PATH: &str = "/v1/dw/transfer-out/margin";
/// Account balances.
pub const GET_BALANCE_PATH: &str = "/v1/margin/accounts/balance";
/// Loan order history.
pub const GET_LOAN_ORDER_PATH: &str = "/v1/margin/loan-orders";
/// Interest rates and loan quotas.
pub const GET_LOAN_INFO_PATH: &str = "/v1/margin/loan-info";
/// Loan application.
pub const APPLY_LOAN_PATH: &str = "/v1/margin/orders";
/// Loan repayment; `{order-id}` is replaced by the loan order id.
pub const REPAY_LOAN_PATH: &str = "/v1/margin/orders/{order-id}/repay";
/// Leverage position limit.
pub const GET_LEVERAGE_POSITION_LIMIT_PATH: &str = "/v2/margin/limit";

/// Endpoint of a transfer in the given direction.
pub fn transfer_path(direction: MarginTransferDirection) -> &'static str {
    match direction {
        MarginTransferDirection::SpotToMargin => TRANSFER_TO_MARGIN_PATH,
        MarginTransferDirection::MarginToSpot => TRANSFER_TO_SPOT_PATH,
    }
}

/// Endpoint of a repayment for `order_id`.
///
/// ```rust
/// use htx_client::isolated_margin::repay_path;
///
/// assert_eq!(repay_path(12345), "/v1/margin/orders/12345/repay");
/// ```
pub fn repay_path(order_id: i64) -> String {
    REPAY_LOAN_PATH.replace("{order-id}", &order_id.to_string())
}

/// Client for the isolated-margin endpoints.
///
/// The transport is fixed at construction; the service holds no mutable
/// state and can be shared across tasks.
#[derive(Debug)]
pub struct IsolatedMarginService<T: RestTransport = HtxRestConnection> {
    transport: T,
}

impl IsolatedMarginService<HtxRestConnection> {
    /// Builds a service over a signed [`HtxRestConnection`].
    ///
    /// # Errors
    ///
    /// Fails if the options do not validate or the signing key is unusable.
    pub fn new(options: HtxOptions) -> Result<Self> {
        Ok(Self::with_transport(HtxRestConnection::new(&options)?))
    }
}

impl<T: RestTransport> IsolatedMarginService<T> {
    /// Builds a service over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Transfers funds between spot and an isolated-margin account.
    ///
    /// Returns the transfer id.
    #[instrument(
        name = "isolated_margin_transfer",
        skip_all,
        fields(
            direction = ?request.direction,
            symbol = ?request.symbol,
            currency = ?request.currency
        )
    )]
    pub async fn transfer(&self, request: &IsolatedMarginTransferRequest) -> Result<i64> {
        InputChecker::checker()
            .should_not_null(request.direction, "direction")?
            .check_symbol(request.symbol.as_deref())?
            .check_currency(request.currency.as_deref())?
            .should_not_null(request.amount, "amount")?;

        let direction = request
            .direction
            .ok_or_else(|| Error::invalid_argument("[Input] direction should not be null"))?;
        let params = UrlParams::new()
            .put_to_post_opt("currency", request.currency.as_deref())
            .put_to_post_opt("symbol", request.symbol.as_deref())
            .put_to_post_opt("amount", request.amount);

        let response = self
            .transport
            .execute_post_with_signature(transfer_path(direction), &params)
            .await?;
        let id = data_as_i64(&response)?;
        debug!(transfer_id = id, "Isolated margin transfer accepted");
        Ok(id)
    }

    /// Applies for a loan. Returns the loan order id.
    #[instrument(
        name = "isolated_margin_apply_loan",
        skip_all,
        fields(symbol = ?request.symbol, currency = ?request.currency)
    )]
    pub async fn apply_loan(&self, request: &IsolatedMarginApplyLoanRequest) -> Result<i64> {
        InputChecker::checker()
            .check_symbol(request.symbol.as_deref())?
            .check_currency(request.currency.as_deref())?
            .should_not_null(request.amount, "amount")?;

        let params = UrlParams::new()
            .put_to_post_opt("currency", request.currency.as_deref())
            .put_to_post_opt("symbol", request.symbol.as_deref())
            .put_to_post_opt("amount", request.amount);

        let response = self
            .transport
            .execute_post_with_signature(APPLY_LOAN_PATH, &params)
            .await?;
        let id = data_as_i64(&response)?;
        debug!(loan_order_id = id, "Isolated margin loan applied");
        Ok(id)
    }

    /// Repays a loan order. Returns the id reported by the server.
    #[instrument(
        name = "isolated_margin_repay_loan",
        skip_all,
        fields(order_id = ?request.order_id)
    )]
    pub async fn repay_loan(&self, request: &IsolatedMarginRepayLoanRequest) -> Result<i64> {
        InputChecker::checker()
            .should_not_null(request.order_id, "order-id")?
            .should_not_null(request.amount, "amount")?;

        let order_id = request
            .order_id
            .ok_or_else(|| Error::invalid_argument("[Input] order-id should not be null"))?;
        let params = UrlParams::new().put_to_post_opt("amount", request.amount);

        let response = self
            .transport
            .execute_post_with_signature(&repay_path(order_id), &params)
            .await?;
        let id = data_as_i64(&response)?;
        debug!(repay_id = id, "Isolated margin loan repaid");
        Ok(id)
    }

    /// Lists loan orders.
    #[instrument(
        name = "isolated_margin_get_loan_orders",
        skip_all,
        fields(symbol = ?request.symbol)
    )]
    pub async fn get_loan_orders(
        &self,
        request: &IsolatedMarginLoanOrdersRequest,
    ) -> Result<Vec<IsolatedMarginLoanOrder>> {
        InputChecker::checker().check_symbol_if_present(request.symbol.as_deref())?;

        let params = UrlParams::new()
            .put_to_url_opt("symbol", request.symbol.as_deref())
            .put_to_url_opt("start-date", request.start_date.map(format_query_date))
            .put_to_url_opt("end-date", request.end_date.map(format_query_date))
            .put_to_url_opt("states", request.states_param())
            .put_to_url_opt("from", request.from)
            .put_to_url_opt("size", request.size)
            .put_to_url_opt("direct", request.direction.map(QueryDirection::as_str))
            .put_to_url_opt("sub-uid", request.sub_uid);

        let response = self
            .transport
            .execute_get_with_signature(GET_LOAN_ORDER_PATH, &params)
            .await?;
        let orders = parser::parse_array(data(&response)?, "data", parser::parse_loan_order)?;
        debug!(count = orders.len(), "Fetched isolated margin loan orders");
        Ok(orders)
    }

    /// Lists isolated-margin accounts with their balances.
    #[instrument(
        name = "isolated_margin_get_loan_balance",
        skip_all,
        fields(symbol = ?request.symbol)
    )]
    pub async fn get_loan_balance(
        &self,
        request: &IsolatedMarginAccountRequest,
    ) -> Result<Vec<IsolatedMarginAccount>> {
        let params = UrlParams::new()
            .put_to_url_opt("symbol", request.symbol.as_deref())
            .put_to_url_opt("sub-uid", request.sub_uid);

        let response = self
            .transport
            .execute_get_with_signature(GET_BALANCE_PATH, &params)
            .await?;
        let accounts = parser::parse_array(data(&response)?, "data", parser::parse_account)?;
        debug!(count = accounts.len(), "Fetched isolated margin balances");
        Ok(accounts)
    }

    /// Lists interest rates and loan quotas per trading pair.
    #[instrument(
        name = "isolated_margin_get_loan_info",
        skip_all,
        fields(symbols = ?request.symbols)
    )]
    pub async fn get_loan_info(
        &self,
        request: &IsolatedMarginLoanInfoRequest,
    ) -> Result<Vec<IsolatedMarginSymbolInfo>> {
        let params = UrlParams::new().put_to_url_opt("symbols", request.symbols.as_deref());

        let response = self
            .transport
            .execute_get_with_signature(GET_LOAN_INFO_PATH, &params)
            .await?;
        let infos = parser::parse_array(data(&response)?, "data", parser::parse_symbol_info)?;
        debug!(count = infos.len(), "Fetched isolated margin loan info");
        Ok(infos)
    }

    /// Fetches the leverage position limit of a currency.
    #[instrument(
        name = "isolated_margin_get_leverage_position_limit",
        skip_all,
        fields(currency = ?request.currency)
    )]
    pub async fn get_leverage_position_limit(
        &self,
        request: &LeveragePositionLimitRequest,
    ) -> Result<Vec<LeveragePositionLimit>> {
        InputChecker::checker().check_currency(request.currency.as_deref())?;

        let params = UrlParams::new().put_to_url_opt("currency", request.currency.as_deref());

        let response = self
            .transport
            .execute_get_with_signature(GET_LEVERAGE_POSITION_LIMIT_PATH, &params)
            .await?;
        let limits =
            parser::parse_array(data(&response)?, "data", parser::parse_leverage_position_limit)?;
        debug!(count = limits.len(), "Fetched leverage position limits");
        Ok(limits)
    }
}

fn data(response: &Value) -> Result<&Value> {
    response
        .get("data")
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::from(ParseError::missing_field("data")))
}

fn data_as_i64(response: &Value) -> Result<i64> {
    let data = data(response)?;
    value_as_i64(data).ok_or_else(|| {
        Error::from(ParseError::invalid_value("data", format!("expected integer, got {data}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transfer_path() {
        assert_eq!(
            transfer_path(MarginTransferDirection::SpotToMargin),
            "/v1/dw/transfer-in/margin"
        );
        assert_eq!(
            transfer_path(MarginTransferDirection::MarginToSpot),
            "/v1/dw/transfer-out/margin"
        );
    }

    #[test]
    fn test_repay_path() {
        assert_eq!(repay_path(0), "/v1/margin/orders/0/repay");
        assert_eq!(repay_path(-5), "/v1/margin/orders/-5/repay");
    }

    #[test]
    fn test_data_as_i64() {
        assert_eq!(data_as_i64(&json!({"data": 12345})).unwrap(), 12345);
        assert_eq!(data_as_i64(&json!({"status": "ok", "data": "678"})).unwrap(), 678);
        assert!(matches!(
            data_as_i64(&json!({"status": "ok"})).unwrap_err(),
            Error::Parse(_)
        ));
        assert!(data_as_i64(&json!({"data": null})).is_err());
        assert!(data_as_i64(&json!({"data": [1]})).is_err());
    }
}
