//! Local input checks run before any request is sent.
//!
//! Failures are [`Error::InvalidArgument`] with messages prefixed `[Input]`.
//! Symbols and currency codes may contain ASCII letters and digits only.

use htx_core::error::{Error, Result};

/// Chainable input checker.
///
/// ```rust
/// use htx_client::validation::InputChecker;
///
/// let result = InputChecker::checker()
///     .should_not_null(Some(1), "order-id")
///     .and_then(|c| c.check_symbol(Some("btcusdt")))
///     .and_then(|c| c.check_currency(Some("usdt")));
/// assert!(result.is_ok());
///
/// let err = InputChecker::checker().check_symbol(Some("btc/usdt")).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid argument: [Input] symbol is invalid");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InputChecker;

impl InputChecker {
    /// Starts a check chain.
    pub fn checker() -> Self {
        Self
    }

    /// Fails with `[Input] <name> should not be null` when `value` is `None`.
    pub fn should_not_null<T>(self, value: Option<T>, name: &str) -> Result<Self> {
        if value.is_none() {
            return Err(Error::invalid_argument(format!("[Input] {name} should not be null")));
        }
        Ok(self)
    }

    /// Requires a non-empty alphanumeric symbol.
    pub fn check_symbol(self, symbol: Option<&str>) -> Result<Self> {
        check_code(symbol, "symbol")?;
        Ok(self)
    }

    /// Requires a non-empty alphanumeric currency.
    pub fn check_currency(self, currency: Option<&str>) -> Result<Self> {
        check_code(currency, "currency")?;
        Ok(self)
    }

    /// Checks the symbol format only when one is given.
    pub fn check_symbol_if_present(self, symbol: Option<&str>) -> Result<Self> {
        if symbol.is_some() {
            check_code(symbol, "symbol")?;
        }
        Ok(self)
    }
}

fn check_code(value: Option<&str>, name: &str) -> Result<()> {
    match value {
        None | Some("") => Err(Error::invalid_argument(format!("[Input] {name} is mandatory"))),
        Some(v) if has_special_char(v) => {
            Err(Error::invalid_argument(format!("[Input] {name} is invalid")))
        }
        Some(_) => Ok(()),
    }
}

/// Whether `value` contains anything other than ASCII letters and digits.
pub fn has_special_char(value: &str) -> bool {
    !value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: &Error) -> String {
        err.to_string()
    }

    #[test]
    fn test_should_not_null() {
        assert!(InputChecker::checker().should_not_null(Some("x"), "amount").is_ok());
        let err = InputChecker::checker()
            .should_not_null(None::<i64>, "order-id")
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(message(&err).contains("[Input] order-id should not be null"));
    }

    #[test]
    fn test_check_symbol() {
        assert!(InputChecker::checker().check_symbol(Some("btcusdt")).is_ok());
        assert!(InputChecker::checker().check_symbol(Some("BTC3L")).is_ok());

        let missing = InputChecker::checker().check_symbol(None).unwrap_err();
        assert!(message(&missing).contains("[Input] symbol is mandatory"));
        let empty = InputChecker::checker().check_symbol(Some("")).unwrap_err();
        assert!(message(&empty).contains("[Input] symbol is mandatory"));

        for bad in ["btc usdt", "btc/usdt", "btc_usdt", "btc-usdt", "btc\nusdt", "btcüsdt"] {
            let err = InputChecker::checker().check_symbol(Some(bad)).unwrap_err();
            assert!(message(&err).contains("[Input] symbol is invalid"), "{bad}");
        }
    }

    #[test]
    fn test_check_currency() {
        assert!(InputChecker::checker().check_currency(Some("usdt")).is_ok());
        let err = InputChecker::checker().check_currency(Some("us$dt")).unwrap_err();
        assert!(message(&err).contains("[Input] currency is invalid"));
        let err = InputChecker::checker().check_currency(None).unwrap_err();
        assert!(message(&err).contains("currency is mandatory"));
    }

    #[test]
    fn test_check_symbol_if_present() {
        assert!(InputChecker::checker().check_symbol_if_present(None).is_ok());
        assert!(InputChecker::checker().check_symbol_if_present(Some("ethusdt")).is_ok());
        assert!(InputChecker::checker().check_symbol_if_present(Some("eth.usdt")).is_err());
        assert!(InputChecker::checker().check_symbol_if_present(Some("")).is_err());
    }

    #[test]
    fn test_chain_stops_at_first_failure() {
        let err = InputChecker::checker()
            .should_not_null(None::<u8>, "direction")
            .and_then(|c| c.check_symbol(None))
            .unwrap_err();
        assert!(message(&err).contains("direction"));
    }
}
