use crate::error::{Error, NetworkError, Result};
use reqwest::{
    Method,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::builder::HttpClient;

impl HttpClient {
    /// Sends one HTTP request and returns the parsed JSON body.
    ///
    /// The whole exchange (connect, send, read body) is bounded by
    /// `HttpConfig::timeout`. A JSON `body` is serialized and sent with
    /// `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The operation times out
    /// - The request body exceeds `max_request_size`
    /// - The server returns an error status code
    /// - A success response body is not valid JSON
    /// - Network communication fails
    #[instrument(
        name = "http_fetch",
        skip(self, headers, body),
        fields(
            method = %method,
            url = %redact_query(url),
            timeout_ms = %self.config().timeout.as_millis()
        )
    )]
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        let total_timeout = self.config().timeout;

        match tokio::time::timeout(total_timeout, self.fetch_once(url, method, headers, body)).await
        {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(
                    url = %redact_query(url),
                    timeout_ms = %total_timeout.as_millis(),
                    "HTTP request timed out"
                );
                Err(Error::timeout(format!(
                    "Request to {} timed out after {}ms",
                    redact_query(url),
                    total_timeout.as_millis()
                )))
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        method: Method,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut request = self.client().request(method, url);

        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        if let Some(ref body) = body {
            let body_str = serde_json::to_string(body)?;
            let limit = self.config().max_request_size;

            if body_str.len() > limit {
                return Err(NetworkError::PayloadTooLarge {
                    size: body_str.len(),
                    limit,
                }
                .into());
            }

            if self.config().verbose {
                debug!(body = %body_str, "HTTP request with body");
            }

            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body_str);
        }

        let response = request.send().await.map_err(|e| {
            error!(
                error = %e,
                "HTTP request send failed"
            );
            Error::from(e)
        })?;

        self.process_response_with_limit(response, url).await
    }

    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, url: &str, headers: Option<HeaderMap>) -> Result<Value> {
        self.fetch(url, Method::GET, headers, None).await
    }

    /// Executes a POST request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        self.fetch(url, Method::POST, headers, body).await
    }
}

/// Strips the query string so signatures and access keys stay out of logs.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
