//! GitHub activity viewer.

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::Response;
use folio_core::activity::{ActivityEvent, ActivitySource, ACTIVITY_PAGE_SIZE};
use folio_core::listing::Listing;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct EventView {
    label: String,
    repo: String,
    repo_url: String,
    created_at: String,
    created_on: String,
}

impl From<&ActivityEvent> for EventView {
    fn from(event: &ActivityEvent) -> Self {
        Self {
            label: event.label(),
            repo: event.repo.name.clone(),
            repo_url: event.repo_url(),
            created_at: event.created_at.to_rfc3339(),
            created_on: event.created_at.format("%b %e, %Y").to_string(),
        }
    }
}

#[derive(Serialize)]
struct GithubData<'a> {
    username: &'a str,
    events: Vec<EventView>,
    degraded: bool,
}

/// Same degradation policy as the courses listing.
pub async fn load_activity(source: &dyn ActivitySource, username: &str) -> Listing<ActivityEvent> {
    let result = source.recent_events(username, ACTIVITY_PAGE_SIZE).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, username, "Failed to load GitHub activity");
    }
    result.into()
}

/// GET /github
pub async fn github_page(
    viewer: Viewer,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    let username = state.config.github_username.as_str();
    let listing = load_activity(state.activity.as_ref(), username).await;

    let data = GithubData {
        username,
        events: listing.items().iter().map(EventView::from).collect(),
        degraded: listing.is_degraded(),
    };

    render_page(
        &state.templates,
        StatusCode::OK,
        "github.html",
        Page::new(uri.path(), &viewer, data),
    )
}
