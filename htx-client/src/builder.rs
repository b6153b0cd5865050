//! Fluent construction of [`HtxOptions`].

use crate::options::{AWS_REST_HOST, HtxOptions, SignatureMethod};
use htx_core::Result;
use htx_core::config::ProxyConfig;
use htx_core::credentials::SecretString;
use htx_core::http_client::HttpConfig;
use std::time::Duration;

/// Builder for [`HtxOptions`].
///
/// # Example
///
/// ```no_run
/// use htx_client::{HtxOptionsBuilder, SignatureMethod};
/// use std::time::Duration;
///
/// let options = HtxOptionsBuilder::new()
///     .api_key("your-access-key")
///     .secret_key("your-ed25519-private-key")
///     .signature_method(SignatureMethod::Ed25519)
///     .aws(true)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtxOptionsBuilder {
    options: HtxOptions,
}

impl HtxOptionsBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.options.api_key = Some(SecretString::new(key));
        self
    }

    /// Sets the secret key. For Ed25519 this is the Base64 private key.
    pub fn secret_key(mut self, secret: impl Into<String>) -> Self {
        self.options.secret_key = Some(SecretString::new(secret));
        self
    }

    /// Selects the signing scheme.
    pub fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.options.signature_method = method;
        self
    }

    /// Overrides the REST host, e.g. to point at a mock server.
    pub fn rest_host(mut self, host: impl Into<String>) -> Self {
        self.options.rest_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Uses the AWS-optimised host when `enabled`.
    pub fn aws(mut self, enabled: bool) -> Self {
        if enabled {
            self.options.rest_host = AWS_REST_HOST.to_string();
        }
        self
    }

    /// Sets the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.http.timeout = timeout;
        self
    }

    /// Sets the TCP connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.http.connect_timeout = timeout;
        self
    }

    /// Routes requests through a proxy.
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.options.http.proxy = Some(proxy);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.http.user_agent = user_agent.into();
        self
    }

    /// Replaces the whole HTTP configuration.
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.options.http = http;
        self
    }

    /// Validates and returns the options.
    pub fn build(self) -> Result<HtxOptions> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Returns the options without validating them.
    pub fn build_unchecked(self) -> HtxOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let options = HtxOptionsBuilder::new()
            .api_key("ak")
            .secret_key("sk")
            .signature_method(SignatureMethod::Ed25519)
            .rest_host("http://127.0.0.1:9000/")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .user_agent("margin-bot/0.1")
            .build()
            .unwrap();

        assert_eq!(options.api_key.as_ref().unwrap().expose_secret(), "ak");
        assert_eq!(options.signature_method, SignatureMethod::Ed25519);
        assert_eq!(options.rest_host, "http://127.0.0.1:9000");
        assert_eq!(options.http.timeout, Duration::from_secs(5));
        assert_eq!(options.http.connect_timeout, Duration::from_secs(2));
        assert_eq!(options.http.user_agent, "margin-bot/0.1");
    }

    #[test]
    fn test_builder_aws_host() {
        let options = HtxOptionsBuilder::new().aws(true).build_unchecked();
        assert_eq!(options.rest_host, AWS_REST_HOST);
    }

    #[test]
    fn test_build_rejects_missing_credentials() {
        let err = HtxOptionsBuilder::new().api_key("ak").build().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("secret_key"));
    }
}
