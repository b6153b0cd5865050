use crate::error::{Error, NetworkError, ParseError, Result};
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::builder::HttpClient;
use super::request::redact_query;

const BODY_PREVIEW_SIZE: usize = 200;

impl HttpClient {
    #[instrument(
        name = "http_process_response",
        skip(self, response, url),
        fields(status)
    )]
    pub(crate) async fn process_response_with_limit(
        &self,
        response: Response,
        url: &str,
    ) -> Result<Value> {
        let status = response.status();
        let max_size = self.config().max_response_size;
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        tracing::Span::current().record("status", status.as_u16());

        if let Some(content_length) = response.content_length()
            && content_length > max_size as u64
        {
            warn!(
                url = %redact_query(url),
                content_length = content_length,
                max_size = max_size,
                "Response exceeds size limit (Content-Length check)"
            );
            return Err(NetworkError::PayloadTooLarge {
                size: usize::try_from(content_length).unwrap_or(usize::MAX),
                limit: max_size,
            }
            .into());
        }

        let body_bytes = self
            .stream_response_with_limit(response, url, max_size)
            .await?;

        let body_preview = preview(&body_bytes);
        debug!(
            status = %status,
            body_length = body_bytes.len(),
            body_preview = %body_preview,
            "HTTP response received"
        );

        if !status.is_success() {
            let body_text = String::from_utf8_lossy(&body_bytes).into_owned();
            let err = Self::handle_http_error(status, &body_text, retry_after);
            error!(
                status = status.as_u16(),
                error = %err,
                body_preview = %body_preview,
                "HTTP error response"
            );
            return Err(err);
        }

        serde_json::from_slice(&body_bytes).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %body_preview,
                "HTTP response body is not valid JSON"
            );
            Error::from(ParseError::invalid_format(
                "body",
                format!("{e}; body starts with {body_preview:?}"),
            ))
        })
    }

    async fn stream_response_with_limit(
        &self,
        response: Response,
        url: &str,
        max_size: usize,
    ) -> Result<Vec<u8>> {
        use futures_util::StreamExt;

        #[allow(clippy::cast_possible_truncation)]
        let initial_capacity = response
            .content_length()
            .map_or(16 * 1024, |len| std::cmp::min(len as usize, max_size));

        let mut stream = response.bytes_stream();
        let mut body = Vec::with_capacity(initial_capacity);

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| {
                error!(
                    error = %e,
                    "Failed to read response chunk"
                );
                Error::from(e)
            })?;

            let accumulated_size = body.len().saturating_add(chunk.len());
            if accumulated_size > max_size {
                warn!(
                    url = %redact_query(url),
                    accumulated_size = accumulated_size,
                    max_size = max_size,
                    "Response exceeds size limit during streaming"
                );
                return Err(NetworkError::PayloadTooLarge {
                    size: accumulated_size,
                    limit: max_size,
                }
                .into());
            }

            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn handle_http_error(status: StatusCode, body: &str, retry_after: Option<u64>) -> Error {
        let body_preview = preview(body.as_bytes());

        match status {
            StatusCode::BAD_REQUEST => {
                info!(body_preview = %body_preview, "Bad request error");
                Error::invalid_request(body.to_string())
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication error: Unauthorized");
                Error::authentication("Unauthorized")
            }
            StatusCode::FORBIDDEN => {
                warn!("Authentication error: Forbidden");
                Error::authentication("Forbidden")
            }
            StatusCode::NOT_FOUND => {
                info!("Resource not found");
                Error::invalid_request("Not found")
            }
            StatusCode::TOO_MANY_REQUESTS => {
                if let Some(seconds) = retry_after {
                    warn!(
                        retry_after_seconds = seconds,
                        "Rate limit exceeded with retry-after header"
                    );
                    Error::rate_limit(
                        format!("Rate limit exceeded, retry after {seconds} seconds"),
                        Some(Duration::from_secs(seconds)),
                    )
                } else {
                    warn!("Rate limit exceeded without retry-after header");
                    Error::rate_limit("Rate limit exceeded, please retry later", None)
                }
            }
            StatusCode::GATEWAY_TIMEOUT => {
                error!("Gateway timeout");
                Error::from(NetworkError::Timeout)
            }
            s if s.is_server_error() => {
                error!(body_preview = %body_preview, "Server error");
                Error::exchange(
                    s.as_u16().to_string(),
                    s.canonical_reason().unwrap_or("Server error"),
                )
            }
            _ => {
                error!(
                    status = status.as_u16(),
                    body_preview = %body_preview,
                    "Unhandled HTTP error"
                );
                Error::from(NetworkError::RequestFailed {
                    status: status.as_u16(),
                    message: format!("HTTP {status} error: {body_preview}"),
                })
            }
        }
    }
}

fn preview(bytes: &[u8]) -> String {
    let end = bytes.len().min(BODY_PREVIEW_SIZE);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
