//! Admin content creation.
//!
//! Every route here sits behind the `/admin` interception middleware; the
//! mutation additionally takes [`RequireAdmin`].

use std::str::FromStr;

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use folio_core::content::{
    ContentDraft, ContentType, MAX_SLUG_LEN, MAX_SUMMARY_LEN, MAX_TITLE_LEN,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::admin::RequireAdmin;
use crate::middleware::auth::Viewer;
use crate::pages::{render_page, Page};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Slug of the item just created, for the confirmation notice.
    pub created: Option<String>,
}

impl CreateQuery {
    /// Requested content type; defaults to `course` when absent.
    fn content_type(&self) -> AppResult<ContentType> {
        match self.kind.as_deref() {
            None | Some("") => Ok(ContentType::default()),
            Some(raw) => Ok(ContentType::from_str(raw)?),
        }
    }
}

#[derive(Serialize)]
struct KindOption {
    value: &'static str,
    label: &'static str,
}

impl From<ContentType> for KindOption {
    fn from(kind: ContentType) -> Self {
        Self {
            value: kind.as_str(),
            label: kind.label(),
        }
    }
}

#[derive(Serialize)]
struct Limits {
    title: usize,
    slug: usize,
    summary: usize,
}

#[derive(Serialize)]
struct CreateFormData {
    kind: KindOption,
    kinds: Vec<KindOption>,
    created: Option<String>,
    limits: Limits,
}

/// GET /admin
pub async fn admin_index() -> Redirect {
    Redirect::to("/admin/create?type=course")
}

/// GET /admin/create?type=<ContentType>
pub async fn create_form(
    viewer: Viewer,
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Response> {
    let kind = query.content_type()?;

    let data = CreateFormData {
        kind: kind.into(),
        kinds: ContentType::ALL.into_iter().map(KindOption::from).collect(),
        created: query.created,
        limits: Limits {
            title: MAX_TITLE_LEN,
            slug: MAX_SLUG_LEN,
            summary: MAX_SUMMARY_LEN,
        },
    };

    render_page(
        &state.templates,
        StatusCode::OK,
        "admin_create.html",
        Page::new(uri.path(), &viewer, data),
    )
}

/// POST /admin/create?type=<ContentType>
///
/// Validates the draft, hands it to the RPC service, then redirects back to
/// the form with a confirmation notice.
pub async fn create_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
    Form(draft): Form<ContentDraft>,
) -> AppResult<impl IntoResponse> {
    let kind = query.content_type()?;
    draft.check()?;

    let created = state.publisher.create(kind, &draft).await?;

    tracing::info!(
        content_type = %kind,
        content_id = %created.id,
        slug = %draft.slug,
        user_id = %admin.user_id,
        "Content created",
    );

    Ok(Redirect::to(&format!(
        "/admin/create?type={kind}&created={}",
        draft.slug
    )))
}
