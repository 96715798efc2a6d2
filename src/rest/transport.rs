//! HTTP transport shared by public and private requests.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;

use crate::error::CoinbaseError;

/// Time allowed to establish a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Time allowed for a whole request, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Content type of form-encoded bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const BODY_PREVIEW_LEN: usize = 256;

/// A reusable HTTP connection configuration.
///
/// Each call builds its own request, so one `Transport` may be shared by
/// concurrent tasks; connections are pooled by the inner client.
#[derive(Clone)]
pub struct Transport {
    http_client: ClientWithMiddleware,
}

impl Transport {
    /// Build a transport with fixed timeouts and the given TLS policy.
    pub fn new(ssl_verify: bool, user_agent: &str) -> Result<Self, CoinbaseError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinbase-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!ssl_verify)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoinbaseError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self { http_client })
    }

    /// Send one request and return the raw response body.
    ///
    /// `url` must be absolute. `body`, when present, must already be
    /// form-encoded. The HTTP status is not interpreted; whatever body the
    /// server sends is returned for decoding.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<Vec<u8>, CoinbaseError> {
        tracing::debug!(%method, url, has_body = body.is_some(), "sending request");

        let mut request = self.http_client.request(method, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} from {}", status, url);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").finish_non_exhaustive()
    }
}

/// Decode a response body into a JSON object or array.
///
/// Malformed JSON and bare scalars (numbers, strings, booleans, null) are
/// rejected with [`CoinbaseError::Decode`].
pub fn decode_json(raw: &[u8]) -> Result<Value, CoinbaseError> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| {
        tracing::warn!("Failed to parse response: {}", e);
        CoinbaseError::Decode(format!("{e}. Body: {}", body_preview(raw)))
    })?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => {
            tracing::warn!("Response is not a JSON object or array: {}", other);
            Err(CoinbaseError::Decode(format!(
                "expected a JSON object or array. Body: {}",
                body_preview(raw)
            )))
        }
    }
}

fn body_preview(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    match text.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
