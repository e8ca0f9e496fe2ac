//! HTTP forwarder to an external capability service.
//!
//! [`UpstreamProxy`] relays a request (method, path, query, end-to-end headers
//! and body) to `base_url + path_and_query`, then relays the upstream status,
//! headers and body back. One attempt per request; an unreachable upstream is
//! answered with `502 Bad Gateway`.

use std::error::Error as _;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{self, HeaderName};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::CapabilityHandler;

/// Largest request body accepted for forwarding.
pub const MAX_FORWARD_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Connection-scoped headers that must not cross the proxy.
const HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
    header::CONTENT_LENGTH,
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The inbound body could not be read (too large, client disconnect).
    #[error("Failed to read request body: {0}")]
    Body(#[from] axum::Error),

    /// The upstream could not be reached or its body could not be read.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

pub struct UpstreamProxy {
    name: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl UpstreamProxy {
    pub fn new(name: &'static str, base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name,
            base_url,
            client,
        }
    }

    /// Absolute upstream URL for an inbound request URI.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        format!("{}{}", self.base_url, path_and_query)
    }

    async fn forward(&self, request: Request) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let url = self.target_url(&parts.uri);
        let body = axum::body::to_bytes(body, MAX_FORWARD_BODY_BYTES).await?;

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);

        let upstream = self
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

#[async_trait]
impl CapabilityHandler for UpstreamProxy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, request: Request) -> Response {
        let path = request.uri().path().to_string();
        match self.forward(request).await {
            Ok(response) => response,
            Err(ProxyError::Body(e)) => {
                let (status, code) = body_rejection(&e);
                tracing::warn!(capability = self.name, %path, error = %e, %status, "Rejected request body");
                (
                    status,
                    axum::Json(json!({ "error": "Request body rejected", "code": code })),
                )
                    .into_response()
            }
            Err(e @ ProxyError::Upstream(_)) => {
                tracing::error!(capability = self.name, %path, error = %e, "Capability upstream unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    axum::Json(json!({
                        "error": "An upstream service is unavailable",
                        "code": "UPSTREAM_UNAVAILABLE",
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Status and error code for an inbound body that could not be read.
///
/// Only the size limit is the client's payload being too large; anything
/// else (disconnect, malformed chunking) is a bad request.
fn body_rejection(err: &axum::Error) -> (StatusCode, &'static str) {
    let over_limit = err
        .source()
        .is_some_and(|source| source.is::<http_body_util::LengthLimitError>());
    if over_limit {
        (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
    } else {
        (StatusCode::BAD_REQUEST, "BAD_REQUEST")
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}
