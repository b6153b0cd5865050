//! Parsers converting `data` elements into isolated-margin entities.
//!
//! Numeric fields accept JSON numbers and decimal strings. Absent fields map
//! to `None`. An element that is not a JSON object is rejected.

use super::types::{
    IsolatedMarginAccount, IsolatedMarginBalance, IsolatedMarginCurrencyInfo,
    IsolatedMarginLoanOrder, IsolatedMarginSymbolInfo, LeveragePositionLimit,
};
use htx_core::{
    Result,
    error::{Error, ParseError},
    parser_utils::{parse_decimal, parse_i64, parse_string},
};
use serde_json::Value;

fn expect_object<'a>(data: &'a Value, what: &'static str) -> Result<&'a Value> {
    if data.is_object() {
        Ok(data)
    } else {
        Err(Error::from(ParseError::invalid_format(
            what,
            format!("Expected object, got {data}"),
        )))
    }
}

/// Applies `parse` to every element of a JSON array.
pub fn parse_array<T>(
    data: &Value,
    field: &'static str,
    parse: fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    let items = data
        .as_array()
        .ok_or_else(|| Error::from(ParseError::invalid_format(field, "Expected array")))?;
    items.iter().map(parse).collect()
}

fn optional_array<T>(
    data: &Value,
    field: &'static str,
    parse: fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => parse_array(value, field, parse),
    }
}

/// Parses one balance line of an account.
pub fn parse_balance(data: &Value) -> Result<IsolatedMarginBalance> {
    let data = expect_object(data, "list")?;
    Ok(IsolatedMarginBalance {
        currency: parse_string(data, "currency"),
        balance_type: parse_string(data, "type"),
        balance: parse_decimal(data, "balance")?,
    })
}

/// Parses an isolated-margin account.
///
/// ```rust
/// use htx_client::isolated_margin::parser::parse_account;
/// use serde_json::json;
///
/// let account = parse_account(&json!({
///     "id": 18264,
///     "type": "margin",
///     "state": "working",
///     "symbol": "btcusdt",
///     "fl-price": "0",
///     "risk-rate": "10",
///     "list": [{"currency": "btc", "type": "trade", "balance": "0.001"}]
/// }))
/// .unwrap();
/// assert_eq!(account.id, Some(18264));
/// assert_eq!(account.balances.len(), 1);
/// ```
pub fn parse_account(data: &Value) -> Result<IsolatedMarginAccount> {
    let data = expect_object(data, "data")?;
    Ok(IsolatedMarginAccount {
        id: parse_i64(data, "id")?,
        account_type: parse_string(data, "type"),
        state: parse_string(data, "state"),
        symbol: parse_string(data, "symbol"),
        fl_price: parse_decimal(data, "fl-price")?,
        fl_type: parse_string(data, "fl-type"),
        risk_rate: parse_decimal(data, "risk-rate")?,
        balances: optional_array(data, "list", parse_balance)?,
    })
}

/// Parses a loan order.
pub fn parse_loan_order(data: &Value) -> Result<IsolatedMarginLoanOrder> {
    let data = expect_object(data, "data")?;
    Ok(IsolatedMarginLoanOrder {
        id: parse_i64(data, "id")?,
        account_id: parse_i64(data, "account-id")?,
        user_id: parse_i64(data, "user-id")?,
        symbol: parse_string(data, "symbol"),
        currency: parse_string(data, "currency"),
        loan_amount: parse_decimal(data, "loan-amount")?,
        loan_balance: parse_decimal(data, "loan-balance")?,
        interest_rate: parse_decimal(data, "interest-rate")?,
        interest_amount: parse_decimal(data, "interest-amount")?,
        interest_balance: parse_decimal(data, "interest-balance")?,
        state: parse_string(data, "state"),
        created_at: parse_i64(data, "created-at")?,
        accrued_at: parse_i64(data, "accrued-at")?,
        updated_at: parse_i64(data, "updated-at")?,
        deduct_currency: parse_string(data, "deduct-currency"),
        deduct_amount: parse_decimal(data, "deduct-amount")?,
        deduct_rate: parse_decimal(data, "deduct-rate")?,
        paid_point: parse_decimal(data, "paid-point")?,
        paid_coin: parse_decimal(data, "paid-coin")?,
        hour_interest_rate: parse_decimal(data, "hour-interest-rate")?,
        day_interest_rate: parse_decimal(data, "day-interest-rate")?,
    })
}

/// Parses the loan terms of one currency.
pub fn parse_currency_info(data: &Value) -> Result<IsolatedMarginCurrencyInfo> {
    let data = expect_object(data, "currencies")?;
    Ok(IsolatedMarginCurrencyInfo {
        currency: parse_string(data, "currency"),
        interest_rate: parse_decimal(data, "interest-rate")?,
        min_loan_amt: parse_decimal(data, "min-loan-amt")?,
        max_loan_amt: parse_decimal(data, "max-loan-amt")?,
        loanable_amt: parse_decimal(data, "loanable-amt")?,
        actual_rate: parse_decimal(data, "actual-rate")?,
    })
}

/// Parses the loan terms of a trading pair.
pub fn parse_symbol_info(data: &Value) -> Result<IsolatedMarginSymbolInfo> {
    let data = expect_object(data, "data")?;
    Ok(IsolatedMarginSymbolInfo {
        symbol: parse_string(data, "symbol"),
        currencies: optional_array(data, "currencies", parse_currency_info)?,
    })
}

/// Parses a leverage position limit.
pub fn parse_leverage_position_limit(data: &Value) -> Result<LeveragePositionLimit> {
    let data = expect_object(data, "data")?;
    Ok(LeveragePositionLimit {
        currency: parse_string(data, "currency"),
        max_holdings: parse_decimal(data, "maxHoldings")?,
    })
}
