use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

/// GET /
pub async fn home(
    viewer: Viewer,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    render_page(
        &state.templates,
        StatusCode::OK,
        "home.html",
        Page::new(uri.path(), &viewer, json!({})),
    )
}
