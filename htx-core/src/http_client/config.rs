use crate::config::ProxyConfig;
use crate::error::{ConfigValidationError, ValidationResult};
use std::time::Duration;

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Overall timeout for one request, including reading the body.
    pub timeout: Duration,
    /// TCP connection timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Log request bodies at debug level.
    pub verbose: bool,
    /// Default User-Agent header value
    pub user_agent: String,
    /// Optional proxy configuration
    pub proxy: Option<ProxyConfig>,
    /// Maximum response body size in bytes (default: 10MB)
    pub max_response_size: usize,
    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_size: usize,
    /// Maximum number of idle connections per host in the connection pool.
    pub pool_max_idle_per_host: usize,
    /// Timeout for idle connections in the pool.
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            verbose: false,
            user_agent: concat!("htx-rust/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
            max_response_size: 10 * 1024 * 1024,
            max_request_size: 1024 * 1024,
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl HttpConfig {
    /// Validates the HTTP configuration parameters.
    ///
    /// # Validation Rules
    ///
    /// - `timeout` above 5 minutes or equal to zero is an error
    /// - `timeout` below 1 second produces a warning
    /// - `connect_timeout` longer than `timeout` produces a warning
    /// - size limits must be non-zero
    ///
    /// ```rust
    /// use htx_core::http_client::HttpConfig;
    /// use std::time::Duration;
    ///
    /// assert!(HttpConfig::default().validate().is_ok());
    ///
    /// let too_long = HttpConfig {
    ///     timeout: Duration::from_secs(600),
    ///     ..Default::default()
    /// };
    /// assert!(too_long.validate().is_err());
    /// ```
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        let mut result = ValidationResult::new();

        if self.timeout.is_zero() {
            return Err(ConfigValidationError::invalid(
                "timeout",
                "timeout cannot be zero",
            ));
        }
        if self.timeout > Duration::from_secs(300) {
            return Err(ConfigValidationError::too_high(
                "timeout",
                format!("{:?}", self.timeout),
                "5 minutes",
            ));
        }
        if self.timeout < Duration::from_secs(1) {
            result.add_warning(format!(
                "timeout {:?} is very short, may cause frequent timeouts",
                self.timeout
            ));
        }
        if self.connect_timeout > self.timeout {
            result.add_warning(format!(
                "connect_timeout {:?} exceeds timeout {:?}",
                self.connect_timeout, self.timeout
            ));
        }

        if self.max_request_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_request_size",
                "max_request_size cannot be zero",
            ));
        }
        if self.max_response_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_response_size",
                "max_response_size cannot be zero",
            ));
        }

        Ok(result)
    }
}
