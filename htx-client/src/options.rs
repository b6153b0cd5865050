//! Client options: credentials, signing mode, REST host and HTTP settings.

use htx_core::credentials::SecretString;
use htx_core::error::{ConfigValidationError, Error, Result, ValidationResult};
use htx_core::http_client::HttpConfig;
use std::fmt;
use std::str::FromStr;

use crate::builder::HtxOptionsBuilder;

/// Primary REST host.
pub const DEFAULT_REST_HOST: &str = "https://api.huobi.pro";

/// REST host optimised for clients running on AWS.
pub const AWS_REST_HOST: &str = "https://api-aws.huobi.pro";

/// Environment variable holding the access key.
pub const ENV_API_KEY: &str = "HTX_API_KEY";
/// Environment variable holding the secret key (HMAC secret or Ed25519 private key).
pub const ENV_SECRET_KEY: &str = "HTX_SECRET_KEY";
/// Environment variable selecting the signature method (`256` or `25519`).
pub const ENV_SIGNATURE_METHOD: &str = "HTX_SIGNATURE_METHOD";
/// Environment variable overriding the REST host.
pub const ENV_REST_HOST: &str = "HTX_REST_HOST";

/// How requests are signed.
///
/// The configuration codes `"256"` and `"25519"` are accepted by
/// [`SignatureMethod::from_code`] and by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureMethod {
    /// HMAC-SHA256 keyed with the secret key.
    #[default]
    HmacSha256,
    /// Ed25519 with a private key registered for the access key.
    Ed25519,
}

impl SignatureMethod {
    /// Parses the configuration code (`"256"` or `"25519"`).
    ///
    /// ```rust
    /// use htx_client::SignatureMethod;
    ///
    /// assert_eq!(SignatureMethod::from_code("256"), Some(SignatureMethod::HmacSha256));
    /// assert_eq!(SignatureMethod::from_code("25519"), Some(SignatureMethod::Ed25519));
    /// assert_eq!(SignatureMethod::from_code("512"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "256" => Some(Self::HmacSha256),
            "25519" => Some(Self::Ed25519),
            _ => None,
        }
    }

    /// Configuration code of this method.
    pub fn code(self) -> &'static str {
        match self {
            Self::HmacSha256 => "256",
            Self::Ed25519 => "25519",
        }
    }

    /// Value of the `SignatureMethod` query parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::HmacSha256 => "HmacSHA256",
            Self::Ed25519 => "Ed25519",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    /// Accepts the configuration codes and the wire names, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(method) = Self::from_code(s) {
            return Ok(method);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "hmacsha256" | "hmac" => Ok(Self::HmacSha256),
            "ed25519" => Ok(Self::Ed25519),
            _ => Err(Error::invalid_argument(format!(
                "Unsupported signature method: {s} (expected \"256\" or \"25519\")"
            ))),
        }
    }
}

/// Options used to build an authenticated REST connection.
///
/// ```rust
/// use htx_client::{HtxOptions, SignatureMethod};
///
/// let options = HtxOptions::builder()
///     .api_key("access-key")
///     .secret_key("secret-key")
///     .signature_method(SignatureMethod::HmacSha256)
///     .build()
///     .unwrap();
/// assert_eq!(options.rest_host, "https://api.huobi.pro");
/// ```
#[derive(Debug, Clone)]
pub struct HtxOptions {
    /// Access key, sent as `AccessKeyId`.
    pub api_key: Option<SecretString>,
    /// HMAC secret key, or the Base64 Ed25519 private key.
    pub secret_key: Option<SecretString>,
    /// Signing scheme.
    pub signature_method: SignatureMethod,
    /// Scheme and authority of the REST API, without a trailing slash.
    pub rest_host: String,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl Default for HtxOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            signature_method: SignatureMethod::default(),
            rest_host: DEFAULT_REST_HOST.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl HtxOptions {
    /// Starts a fluent builder.
    pub fn builder() -> HtxOptionsBuilder {
        HtxOptionsBuilder::new()
    }

    /// Reads options from the environment, loading a `.env` file first if present.
    ///
    /// Unset variables keep their defaults. An unparseable
    /// `HTX_SIGNATURE_METHOD` is an error.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self {
            api_key: lookup(ENV_API_KEY).map(SecretString::new),
            secret_key: lookup(ENV_SECRET_KEY).map(SecretString::new),
            ..Self::default()
        };
        if let Some(method) = lookup(ENV_SIGNATURE_METHOD) {
            options.signature_method = method.parse()?;
        }
        if let Some(host) = lookup(ENV_REST_HOST) {
            options.rest_host = host.trim_end_matches('/').to_string();
        }
        Ok(options)
    }

    /// Checks that the options can produce a working connection.
    ///
    /// Credentials must be present and non-empty, and `rest_host` must be an
    /// absolute `http`/`https` URL without a path. Plain `http` is accepted
    /// with a warning.
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        if self.api_key.as_ref().is_none_or(SecretString::is_empty) {
            return Err(ConfigValidationError::missing("api_key"));
        }
        if self.secret_key.as_ref().is_none_or(SecretString::is_empty) {
            return Err(ConfigValidationError::missing("secret_key"));
        }

        let mut result = ValidationResult::new();
        let url = reqwest::Url::parse(&self.rest_host)
            .map_err(|e| ConfigValidationError::invalid("rest_host", e.to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" => result.add_warning(format!(
                "rest_host {} does not use TLS",
                self.rest_host
            )),
            other => {
                return Err(ConfigValidationError::invalid(
                    "rest_host",
                    format!("unsupported scheme {other}"),
                ));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigValidationError::invalid("rest_host", "missing host"));
        }
        if url.path() != "/" || url.query().is_some() {
            return Err(ConfigValidationError::invalid(
                "rest_host",
                "must not contain a path or query",
            ));
        }

        result.merge(self.http.validate()?);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> HtxOptions {
        HtxOptions {
            api_key: Some(SecretString::new("ak")),
            secret_key: Some(SecretString::new("sk")),
            ..HtxOptions::default()
        }
    }

    #[test]
    fn test_signature_method_codes() {
        assert_eq!(SignatureMethod::HmacSha256.code(), "256");
        assert_eq!(SignatureMethod::Ed25519.code(), "25519");
        assert_eq!(SignatureMethod::HmacSha256.wire_name(), "HmacSHA256");
        assert_eq!(SignatureMethod::Ed25519.to_string(), "Ed25519");
        assert_eq!(SignatureMethod::default(), SignatureMethod::HmacSha256);
    }

    #[test]
    fn test_signature_method_from_str() {
        assert_eq!("25519".parse::<SignatureMethod>().unwrap(), SignatureMethod::Ed25519);
        assert_eq!("HmacSHA256".parse::<SignatureMethod>().unwrap(), SignatureMethod::HmacSha256);
        assert_eq!(" ed25519 ".parse::<SignatureMethod>().unwrap(), SignatureMethod::Ed25519);
        assert!("rsa".parse::<SignatureMethod>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_validate_requires_credentials() {
        let mut options = valid();
        options.api_key = None;
        assert_eq!(options.validate().unwrap_err().field_name(), "api_key");

        let mut options = valid();
        options.secret_key = Some(SecretString::new(""));
        assert_eq!(options.validate().unwrap_err().field_name(), "secret_key");

        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_rest_host() {
        let mut options = valid();
        options.rest_host = "api.huobi.pro".to_string();
        assert_eq!(options.validate().unwrap_err().field_name(), "rest_host");

        options.rest_host = "ftp://api.huobi.pro".to_string();
        assert!(options.validate().is_err());

        options.rest_host = "https://api.huobi.pro/v1".to_string();
        assert!(options.validate().is_err());

        options.rest_host = "http://127.0.0.1:8080".to_string();
        assert!(options.validate().unwrap().has_warnings());

        options.rest_host = AWS_REST_HOST.to_string();
        assert!(!options.validate().unwrap().has_warnings());
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "ak"),
            (ENV_SECRET_KEY, "sk"),
            (ENV_SIGNATURE_METHOD, "25519"),
            (ENV_REST_HOST, "https://api-aws.huobi.pro/"),
        ]
        .into_iter()
        .collect();

        let options = HtxOptions::from_lookup(|k| env.get(k).map(|v| (*v).to_string())).unwrap();
        assert_eq!(options.api_key.unwrap().expose_secret(), "ak");
        assert_eq!(options.signature_method, SignatureMethod::Ed25519);
        assert_eq!(options.rest_host, AWS_REST_HOST);
    }

    #[test]
    fn test_from_lookup_defaults_and_errors() {
        let options = HtxOptions::from_lookup(|_| None).unwrap();
        assert!(options.api_key.is_none());
        assert_eq!(options.rest_host, DEFAULT_REST_HOST);

        let md5 = |k: &str| (k == ENV_SIGNATURE_METHOD).then(|| "md5".to_string());
        let err = HtxOptions::from_lookup(md5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("\"sk\""));
        assert!(rendered.contains("[REDACTED]"));
    }
}
