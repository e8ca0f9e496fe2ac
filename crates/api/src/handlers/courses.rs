//! Courses listing page.

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::Response;
use folio_core::course::{Course, CourseSource};
use folio_core::listing::{Listing, ListingView};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

#[derive(Serialize)]
struct CoursesData<'a> {
    courses: ListingView<'a, Course>,
}

/// Fetch published courses, degrading to an empty listing on any failure.
///
/// One attempt; the error is logged here and never reaches the response.
pub async fn load_published_courses(source: &dyn CourseSource, limit: u32) -> Listing<Course> {
    let result = source.list_published(limit).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, limit, "Failed to load published courses");
    }
    result.into()
}

/// GET /courses
pub async fn courses_page(
    viewer: Viewer,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    let listing =
        load_published_courses(state.courses.as_ref(), state.config.course_page_size).await;

    render_page(
        &state.templates,
        StatusCode::OK,
        "courses.html",
        Page::new(
            uri.path(),
            &viewer,
            CoursesData {
                courses: listing.view(),
            },
        ),
    )
}
