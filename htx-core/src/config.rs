//! Shared configuration types.

use crate::credentials::SecretString;

/// Outbound proxy for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy URL (e.g., "http://127.0.0.1:8080").
    pub url: String,
    /// Optional username for authentication.
    pub username: Option<String>,
    /// Optional password for authentication.
    pub password: Option<SecretString>,
}

impl ProxyConfig {
    /// Create a new proxy configuration with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set credentials for the proxy.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_credentials_are_redacted() {
        let proxy = ProxyConfig::new("http://127.0.0.1:8080").with_credentials("user", "hunter2");
        assert_eq!(proxy.username.as_deref(), Some("user"));
        assert!(!format!("{proxy:?}").contains("hunter2"));
    }
}
