//! Framework resource pages.

use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use folio_core::resources::{self, CATALOGUE};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

/// GET /resources
pub async fn resource_index(
    viewer: Viewer,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    render_page(
        &state.templates,
        StatusCode::OK,
        "resources.html",
        Page::new(uri.path(), &viewer, json!({ "resources": CATALOGUE })),
    )
}

/// GET /resources/{framework}
///
/// Unknown frameworks render the resource not-found view (404), which links
/// back to `/resources`.
pub async fn resource_page(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(framework): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    match resources::find(&framework) {
        Some(resource) => render_page(
            &state.templates,
            StatusCode::OK,
            "resource.html",
            Page::new(uri.path(), &viewer, json!({ "resource": resource })),
        ),
        None => {
            tracing::debug!(%framework, "Unknown resource");
            render_page(
                &state.templates,
                StatusCode::NOT_FOUND,
                "resource_not_found.html",
                Page::new(uri.path(), &viewer, json!({ "framework": framework })),
            )
        }
    }
}
