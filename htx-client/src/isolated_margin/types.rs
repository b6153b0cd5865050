//! Request and response types of the isolated-margin API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Direction of an isolated-margin transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarginTransferDirection {
    /// Spot account into the isolated-margin account.
    SpotToMargin,
    /// Isolated-margin account back to the spot account.
    MarginToSpot,
}

/// State of a loan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanOrderState {
    /// Not yet accruing interest.
    Created,
    /// Accruing interest.
    Accrual,
    /// Fully repaid.
    Cleared,
    /// Cancelled or otherwise invalid.
    Invalid,
    /// Failed.
    Failed,
}

impl LoanOrderState {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Accrual => "accrual",
            Self::Cleared => "cleared",
            Self::Invalid => "invalid",
            Self::Failed => "failed",
        }
    }

    /// Joins states into the comma-separated `states` parameter.
    ///
    /// ```rust
    /// use htx_client::isolated_margin::LoanOrderState;
    ///
    /// let joined = LoanOrderState::join(&[LoanOrderState::Created, LoanOrderState::Accrual]);
    /// assert_eq!(joined.as_deref(), Some("created,accrual"));
    /// assert_eq!(LoanOrderState::join(&[]), None);
    /// ```
    pub fn join(states: &[Self]) -> Option<String> {
        if states.is_empty() {
            return None;
        }
        Some(
            states
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

impl fmt::Display for LoanOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging direction relative to `from`, sent as `direct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDirection {
    /// Older records.
    Prev,
    /// Newer records.
    Next,
}

impl QueryDirection {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Moves funds between the spot and an isolated-margin account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginTransferRequest {
    /// Transfer direction.
    pub direction: Option<MarginTransferDirection>,
    /// Trading pair of the isolated-margin account, e.g. `btcusdt`.
    pub symbol: Option<String>,
    /// Currency moved, e.g. `usdt`.
    pub currency: Option<String>,
    /// Amount moved.
    pub amount: Option<Decimal>,
}

impl IsolatedMarginTransferRequest {
    /// Creates a fully specified transfer.
    pub fn new(
        direction: MarginTransferDirection,
        symbol: impl Into<String>,
        currency: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            direction: Some(direction),
            symbol: Some(symbol.into()),
            currency: Some(currency.into()),
            amount: Some(amount),
        }
    }
}

/// Requests a loan in an isolated-margin account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginApplyLoanRequest {
    /// Trading pair of the account.
    pub symbol: Option<String>,
    /// Currency borrowed.
    pub currency: Option<String>,
    /// Amount borrowed.
    pub amount: Option<Decimal>,
}

impl IsolatedMarginApplyLoanRequest {
    /// Creates a fully specified loan request.
    pub fn new(symbol: impl Into<String>, currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            symbol: Some(symbol.into()),
            currency: Some(currency.into()),
            amount: Some(amount),
        }
    }
}

/// Repays (part of) a loan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginRepayLoanRequest {
    /// Loan order id.
    pub order_id: Option<i64>,
    /// Amount repaid.
    pub amount: Option<Decimal>,
}

impl IsolatedMarginRepayLoanRequest {
    /// Creates a fully specified repayment.
    pub fn new(order_id: i64, amount: Decimal) -> Self {
        Self {
            order_id: Some(order_id),
            amount: Some(amount),
        }
    }
}

/// Filters for the loan order history.
///
/// Every field is optional; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginLoanOrdersRequest {
    /// Trading pair.
    pub symbol: Option<String>,
    /// First day of the query window.
    pub start_date: Option<NaiveDate>,
    /// Last day of the query window.
    pub end_date: Option<NaiveDate>,
    /// Order states to include.
    pub states: Vec<LoanOrderState>,
    /// Order id to page from.
    pub from: Option<i64>,
    /// Page size.
    pub size: Option<u32>,
    /// Paging direction.
    pub direction: Option<QueryDirection>,
    /// Sub-user id.
    pub sub_uid: Option<i64>,
}

impl IsolatedMarginLoanOrdersRequest {
    /// Creates a query for one trading pair.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    /// Sets the first day of the window.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the last day of the window.
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the states to include.
    pub fn with_states(mut self, states: impl IntoIterator<Item = LoanOrderState>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    /// Sets the order id to page from.
    pub fn with_from(mut self, from: i64) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the paging direction.
    pub fn with_direction(mut self, direction: QueryDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Queries on behalf of a sub-user.
    pub fn with_sub_uid(mut self, sub_uid: i64) -> Self {
        self.sub_uid = Some(sub_uid);
        self
    }

    /// The comma-joined `states` value, if any states are set.
    pub fn states_param(&self) -> Option<String> {
        LoanOrderState::join(&self.states)
    }
}

/// Filters for the account balance query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginAccountRequest {
    /// Trading pair; all accounts when unset.
    pub symbol: Option<String>,
    /// Sub-user id.
    pub sub_uid: Option<i64>,
}

impl IsolatedMarginAccountRequest {
    /// Creates a query for one trading pair.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            sub_uid: None,
        }
    }

    /// Queries on behalf of a sub-user.
    pub fn with_sub_uid(mut self, sub_uid: i64) -> Self {
        self.sub_uid = Some(sub_uid);
        self
    }
}

/// Filters for the loan interest-rate and quota query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedMarginLoanInfoRequest {
    /// Comma-separated trading pairs; all pairs when unset.
    pub symbols: Option<String>,
}

impl IsolatedMarginLoanInfoRequest {
    /// Creates a query for an already-joined symbol list.
    pub fn new(symbols: impl Into<String>) -> Self {
        Self {
            symbols: Some(symbols.into()),
        }
    }

    /// Creates a query for several trading pairs.
    ///
    /// ```rust
    /// use htx_client::isolated_margin::IsolatedMarginLoanInfoRequest;
    ///
    /// let request = IsolatedMarginLoanInfoRequest::from_symbols(&["btcusdt", "ethusdt"]);
    /// assert_eq!(request.symbols.as_deref(), Some("btcusdt,ethusdt"));
    /// ```
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Self {
        if symbols.is_empty() {
            return Self::default();
        }
        Self::new(
            symbols
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Query for the leverage position limit of a currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeveragePositionLimitRequest {
    /// Currency, e.g. `btc`.
    pub currency: Option<String>,
}

impl LeveragePositionLimitRequest {
    /// Creates a query for one currency.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: Some(currency.into()),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// One balance line of an isolated-margin account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedMarginBalance {
    /// Currency.
    pub currency: Option<String>,
    /// Balance type (`trade`, `frozen`, `loan`, `interest`, ...).
    pub balance_type: Option<String>,
    /// Amount.
    pub balance: Option<Decimal>,
}

/// An isolated-margin account and its balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedMarginAccount {
    /// Account id.
    pub id: Option<i64>,
    /// Account type.
    pub account_type: Option<String>,
    /// Account state (`working`, `fl-sys`, ...).
    pub state: Option<String>,
    /// Trading pair.
    pub symbol: Option<String>,
    /// Liquidation price.
    pub fl_price: Option<Decimal>,
    /// Liquidation type.
    pub fl_type: Option<String>,
    /// Risk rate.
    pub risk_rate: Option<Decimal>,
    /// Balance lines.
    pub balances: Vec<IsolatedMarginBalance>,
}

/// A loan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedMarginLoanOrder {
    /// Loan order id.
    pub id: Option<i64>,
    /// Margin account id.
    pub account_id: Option<i64>,
    /// Owning user id.
    pub user_id: Option<i64>,
    /// Trading pair.
    pub symbol: Option<String>,
    /// Borrowed currency.
    pub currency: Option<String>,
    /// Amount originally borrowed.
    pub loan_amount: Option<Decimal>,
    /// Principal still outstanding.
    pub loan_balance: Option<Decimal>,
    /// Interest rate.
    pub interest_rate: Option<Decimal>,
    /// Total interest accrued.
    pub interest_amount: Option<Decimal>,
    /// Interest still outstanding.
    pub interest_balance: Option<Decimal>,
    /// Order state, e.g. `accrual` or `cleared`.
    pub state: Option<String>,
    /// Milliseconds since the epoch.
    pub created_at: Option<i64>,
    /// Milliseconds since the epoch.
    pub accrued_at: Option<i64>,
    /// Milliseconds since the epoch.
    pub updated_at: Option<i64>,
    /// Currency used to deduct interest.
    pub deduct_currency: Option<String>,
    /// Amount deducted.
    pub deduct_amount: Option<Decimal>,
    /// Deduction rate.
    pub deduct_rate: Option<Decimal>,
    /// Interest paid in points.
    pub paid_point: Option<Decimal>,
    /// Interest paid in coin.
    pub paid_coin: Option<Decimal>,
    /// Hourly interest rate.
    pub hour_interest_rate: Option<Decimal>,
    /// Daily interest rate.
    pub day_interest_rate: Option<Decimal>,
}

/// Loan terms of one currency within a trading pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedMarginCurrencyInfo {
    /// Currency.
    pub currency: Option<String>,
    /// Base daily interest rate.
    pub interest_rate: Option<Decimal>,
    /// Minimum loan amount.
    pub min_loan_amt: Option<Decimal>,
    /// Maximum loan amount.
    pub max_loan_amt: Option<Decimal>,
    /// Amount still loanable.
    pub loanable_amt: Option<Decimal>,
    /// Rate after discounts.
    pub actual_rate: Option<Decimal>,
}

/// Loan terms of a trading pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedMarginSymbolInfo {
    /// Trading pair.
    pub symbol: Option<String>,
    /// Per-currency terms.
    pub currencies: Vec<IsolatedMarginCurrencyInfo>,
}

/// Maximum leveraged holding of a currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeveragePositionLimit {
    /// Currency.
    pub currency: Option<String>,
    /// Maximum holdings.
    pub max_holdings: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_order_state_wire_values() {
        assert_eq!(LoanOrderState::Cleared.as_str(), "cleared");
        assert_eq!(LoanOrderState::Failed.to_string(), "failed");
        assert_eq!(
            LoanOrderState::join(&[
                LoanOrderState::Created,
                LoanOrderState::Invalid,
                LoanOrderState::Failed
            ])
            .unwrap(),
            "created,invalid,failed"
        );
    }

    #[test]
    fn test_query_direction_wire_values() {
        assert_eq!(QueryDirection::Prev.as_str(), "prev");
        assert_eq!(QueryDirection::Next.to_string(), "next");
    }

    #[test]
    fn test_request_constructors() {
        let transfer = IsolatedMarginTransferRequest::new(
            MarginTransferDirection::SpotToMargin,
            "btcusdt",
            "usdt",
            dec!(10),
        );
        assert_eq!(transfer.symbol.as_deref(), Some("btcusdt"));
        assert_eq!(transfer.amount, Some(dec!(10)));

        assert_eq!(IsolatedMarginTransferRequest::default().direction, None);
        assert_eq!(IsolatedMarginRepayLoanRequest::new(7, dec!(1)).order_id, Some(7));
    }

    #[test]
    fn test_loan_orders_request_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let request = IsolatedMarginLoanOrdersRequest::new("ethusdt")
            .with_start_date(date)
            .with_states([LoanOrderState::Accrual, LoanOrderState::Cleared])
            .with_size(50)
            .with_direction(QueryDirection::Next)
            .with_sub_uid(99);

        assert_eq!(request.start_date, Some(date));
        assert_eq!(request.end_date, None);
        assert_eq!(request.states_param().as_deref(), Some("accrual,cleared"));
        assert_eq!(request.size, Some(50));
        assert_eq!(request.sub_uid, Some(99));
        assert_eq!(IsolatedMarginLoanOrdersRequest::default().states_param(), None);
    }

    #[test]
    fn test_loan_info_from_symbols() {
        let empty: [&str; 0] = [];
        assert_eq!(IsolatedMarginLoanInfoRequest::from_symbols(&empty).symbols, None);
        let one = IsolatedMarginLoanInfoRequest::from_symbols(&[String::from("btcusdt")]);
        assert_eq!(one.symbols.as_deref(), Some("btcusdt"));
    }
}
