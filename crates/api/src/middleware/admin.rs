//! Server-side admin enforcement.
//!
//! Two entry points share the allow-list held in [`AppState::admins`]:
//!
//! - [`require_admin`] intercepts every request under `/admin`.
//! - [`RequireAdmin`] is an extractor for individual admin mutations.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use folio_core::error::CoreError;

use super::auth::{resolve_session, AuthUser, SessionUser};
use crate::error::AppError;
use crate::state::AppState;

/// Where non-admin page visits are sent.
pub const NON_ADMIN_REDIRECT: &str = "/";

/// Requires an allow-listed session. 401 without a session, 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be on the allow-list here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !state.admins.is_admin(user.email.as_deref()) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Request-interception gate for the `/admin` subtree.
///
/// Non-admin `GET`/`HEAD` visits are redirected to [`NON_ADMIN_REDIRECT`];
/// any other method is answered with 403.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let user = resolve_session(request.headers(), &state.config.session);
    let email = user.as_ref().and_then(|u| u.email.as_deref());

    if state.admins.is_admin(email) {
        return next.run(request).await;
    }

    tracing::info!(
        path = %request.uri().path(),
        signed_in = user.is_some(),
        "Blocked non-admin request to admin area",
    );

    if request.method() == Method::GET || request.method() == Method::HEAD {
        Redirect::to(NON_ADMIN_REDIRECT).into_response()
    } else {
        AppError::Core(CoreError::Forbidden("Admin access required".into())).into_response()
    }
}
