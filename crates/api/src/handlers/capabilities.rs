//! Dispatch into the external capability handlers.
//!
//! Requests are passed through untouched; the capability owns the response.

use axum::body::{Body, Bytes};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::capabilities::CapabilityHandler;
use crate::clients::rpc::error_message;
use crate::state::AppState;

/// Longest RPC error message written to the log, in characters.
const MAX_LOGGED_ERROR_CHARS: usize = 2048;

async fn dispatch(handler: &dyn CapabilityHandler, request: Request) -> Response {
    tracing::debug!(
        capability = handler.name(),
        method = %request.method(),
        path = %request.uri().path(),
        "Dispatching to capability",
    );
    handler.handle(request).await
}

/// ANY /api/auth/{*path}
pub async fn auth(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state.capabilities.auth.as_ref(), request).await
}

/// GET | POST | PUT /api/inngest
pub async fn jobs(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state.capabilities.jobs.as_ref(), request).await
}

/// GET | POST /api/trpc/{*path}
///
/// Server errors are relayed unchanged. In development the procedure path and
/// error message are also logged.
pub async fn rpc(
    State(state): State<AppState>,
    Path(procedure): Path<String>,
    request: Request,
) -> Response {
    let response = dispatch(state.capabilities.rpc.as_ref(), request).await;

    if !response.status().is_server_error() || !state.config.app_env.is_development() {
        return response;
    }

    // The capability has already buffered the body; reading it back whole
    // keeps the relayed response byte-for-byte intact.
    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            tracing::error!(
                path = %procedure,
                status = %parts.status,
                error = %truncate_for_log(rpc_error_message(&bytes)),
                "RPC request failed",
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!(
                path = %procedure,
                status = %parts.status,
                error = %e,
                "RPC request failed (error body unreadable)",
            );
            Response::from_parts(parts, Body::empty())
        }
    }
}

/// HEAD on a capability route that only accepts explicit verbs.
///
/// Without this, axum serves HEAD through the GET handler.
pub async fn head_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

fn truncate_for_log(message: String) -> String {
    match message.char_indices().nth(MAX_LOGGED_ERROR_CHARS) {
        Some((cut, _)) => format!("{}... (truncated)", &message[..cut]),
        None => message,
    }
}

/// Pull the message out of a single or batched RPC error body.
pub fn rpc_error_message(body: &Bytes) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("error"))
            .map(error_message)
            .collect::<Vec<_>>()
            .join("; "),
        Ok(value) => match value.get("error") {
            Some(error) => error_message(error),
            None => value.to_string(),
        },
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
