//! Catch-all for paths no route claims.

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

pub async fn not_found(
    viewer: Viewer,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    tracing::debug!(path = %uri.path(), "No route matched");
    render_page(
        &state.templates,
        StatusCode::NOT_FOUND,
        "not_found.html",
        Page::new(uri.path(), &viewer, json!({})),
    )
}
