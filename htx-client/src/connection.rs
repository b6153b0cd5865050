//! Signed REST transport.
//!
//! [`RestTransport`] is the seam between the API façades and the network.
//! [`HtxRestConnection`] is the production implementation: it appends the
//! signature-v2 auth parameters, signs the canonical payload with the
//! configured [`HtxSigner`], sends the request and checks the JSON envelope.

use crate::auth::HtxSigner;
use crate::error::{is_error_response, parse_error};
use crate::options::{HtxOptions, SignatureMethod};
use crate::params::UrlParams;
use async_trait::async_trait;
use htx_core::credentials::SecretString;
use htx_core::error::{ConfigValidationError, Error, Result};
use htx_core::http_client::HttpClient;
use htx_core::signed_request::{HttpMethod, build_query_string, canonical_payload};
use htx_core::time::signature_timestamp_now;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Query parameter carrying the access key.
pub const ACCESS_KEY_ID: &str = "AccessKeyId";
/// Query parameter naming the signing scheme.
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
/// Query parameter carrying the signature version.
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
/// Query parameter carrying the UTC request time.
pub const TIMESTAMP: &str = "Timestamp";
/// Query parameter carrying the Base64 signature.
pub const SIGNATURE: &str = "Signature";
/// Signature version implemented by this connection.
pub const SIGNATURE_VERSION_VALUE: &str = "2";

/// Executes signed requests against a REST endpoint.
///
/// Implementations return the decoded JSON envelope of a successful call.
/// Envelope errors reported by the server are returned as `Err`.
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// Sends a signed GET with `params.query()` in the query string.
    async fn execute_get_with_signature(&self, path: &str, params: &UrlParams) -> Result<Value>;

    /// Sends a signed POST with `params.post()` as the JSON body.
    async fn execute_post_with_signature(&self, path: &str, params: &UrlParams) -> Result<Value>;
}

/// Authenticated HTTP connection to the HTX REST API.
#[derive(Debug)]
pub struct HtxRestConnection {
    http: HttpClient,
    base_url: String,
    host: String,
    access_key: SecretString,
    signer: HtxSigner,
}

impl HtxRestConnection {
    /// Builds a connection from validated options.
    ///
    /// # Errors
    ///
    /// Fails if the options do not validate, if the Ed25519 private key cannot
    /// be decoded, or if the HTTP client cannot be built.
    pub fn new(options: &HtxOptions) -> Result<Self> {
        let validation = options.validate()?;
        for warning in &validation.warnings {
            warn!(warning = %warning, "HTX options warning");
        }

        let access_key = options
            .api_key
            .clone()
            .ok_or_else(|| Error::from(ConfigValidationError::missing("api_key")))?;
        let secret_key = options
            .secret_key
            .as_ref()
            .ok_or_else(|| Error::from(ConfigValidationError::missing("secret_key")))?;

        let url = reqwest::Url::parse(&options.rest_host)
            .map_err(|e| Error::from(ConfigValidationError::invalid("rest_host", e.to_string())))?;
        let host = authority(&url)?;

        let signer = HtxSigner::new(options.signature_method, secret_key)?;
        let http = HttpClient::new(options.http.clone())?;

        debug!(host = %host, method = %signer.method(), "HTX REST connection created");

        Ok(Self {
            http,
            base_url: options.rest_host.trim_end_matches('/').to_string(),
            host,
            access_key,
            signer,
        })
    }

    /// Scheme and authority requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lower-cased host (with port, when explicit) used in the signed payload.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Signing scheme of this connection.
    pub fn signature_method(&self) -> SignatureMethod {
        self.signer.method()
    }

    /// Builds the full signed query string for a request.
    ///
    /// For GET requests `request_params` are signed and sent alongside the
    /// auth parameters. For POST only the auth parameters are in the query.
    pub(crate) fn signed_query(
        &self,
        method: HttpMethod,
        path: &str,
        request_params: &BTreeMap<String, String>,
        timestamp: String,
    ) -> Result<String> {
        let mut params = match method {
            HttpMethod::Get => request_params.clone(),
            HttpMethod::Post => BTreeMap::new(),
        };
        params.insert(ACCESS_KEY_ID.to_string(), self.access_key.expose_secret().to_string());
        params.insert(SIGNATURE_METHOD.to_string(), self.signer.method().wire_name().to_string());
        params.insert(SIGNATURE_VERSION.to_string(), SIGNATURE_VERSION_VALUE.to_string());
        params.insert(TIMESTAMP.to_string(), timestamp);

        let payload = canonical_payload(method, &self.host, path, &params);
        let signature = self.signer.sign(&payload)?;

        Ok(format!(
            "{}&{}={}",
            build_query_string(&params),
            SIGNATURE,
            urlencoding::encode(&signature)
        ))
    }

    fn signed_url(&self, method: HttpMethod, path: &str, params: &UrlParams) -> Result<String> {
        let query = self.signed_query(method, path, params.query(), signature_timestamp_now())?;
        Ok(format!("{}{}?{}", self.base_url, path, query))
    }
}

/// Host as it appears in the signed payload: lower-case, port only if explicit.
fn authority(url: &reqwest::Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::from(ConfigValidationError::invalid("rest_host", "missing host")))?
        .to_ascii_lowercase();
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

fn check_envelope(response: Value) -> Result<Value> {
    if is_error_response(&response) {
        let err = parse_error(&response);
        warn!(error = %err, "HTX API returned an error envelope");
        return Err(err);
    }
    Ok(response)
}

#[async_trait]
impl RestTransport for HtxRestConnection {
    #[instrument(
        name = "htx_signed_get",
        skip_all,
        fields(path = %path, query_len = params.query().len())
    )]
    async fn execute_get_with_signature(&self, path: &str, params: &UrlParams) -> Result<Value> {
        let url = self.signed_url(HttpMethod::Get, path, params)?;
        let response = self.http.get(&url, None).await?;
        check_envelope(response)
    }

    #[instrument(
        name = "htx_signed_post",
        skip_all,
        fields(path = %path, body_len = params.post().len())
    )]
    async fn execute_post_with_signature(&self, path: &str, params: &UrlParams) -> Result<Value> {
        let url = self.signed_url(HttpMethod::Post, path, params)?;
        let response = self.http.post(&url, None, Some(params.post_body())).await?;
        check_envelope(response)
    }
}
