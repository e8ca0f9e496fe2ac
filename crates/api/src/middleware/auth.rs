//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use folio_core::admin::{AdminAllowList, AdminStatus, IdentityState};
use folio_core::error::CoreError;

use crate::auth::session::{token_from_headers, validate_session, SessionConfig};
use crate::error::AppError;
use crate::state::AppState;

/// A signed-in user, taken from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// The provider's user id (from `claims.sub`).
    pub user_id: String,
    /// Primary email, if the provider supplied one.
    pub email: Option<String>,
}

/// Resolve the session on a request. Missing, invalid or expired tokens all
/// resolve to `None`.
pub fn resolve_session(headers: &HeaderMap, config: &SessionConfig) -> Option<SessionUser> {
    let token = token_from_headers(headers)?;
    match validate_session(token, config) {
        Ok(claims) => Some(SessionUser {
            user_id: claims.sub,
            email: claims.email,
        }),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            None
        }
    }
}

/// The current viewer, signed in or not. Never rejects.
///
/// Carries the admin gate output so pages can decide what to display.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user: Option<SessionUser>,
    pub admin: AdminStatus,
}

impl Viewer {
    pub fn new(user: Option<SessionUser>, admins: &AdminAllowList) -> Self {
        let identity = match &user {
            Some(u) => IdentityState::SignedIn {
                email: u.email.clone(),
            },
            None => IdentityState::SignedOut,
        };
        let admin = admins.status(&identity);
        Self { user, admin }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_session(&parts.headers, &state.config.session);
        Ok(Viewer::new(user, &state.admins))
    }
}

/// Requires a valid session. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(&parts.headers, &state.config.session)
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "A valid session is required".into(),
                ))
            })
    }
}
