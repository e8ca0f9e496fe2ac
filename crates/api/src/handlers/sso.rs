//! SSO redirect callback.
//!
//! Runs one [`SsoCallback`] cycle per request: a single provider call, then a
//! `303` to the success target (with the session cookie set) or to the
//! fallback target.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Redirect, Response};
use folio_core::error::CoreError;
use folio_core::sso::{CallbackParams, SessionGrant, SsoCallback};

use crate::auth::session::SESSION_COOKIE;
use crate::error::AppResult;
use crate::state::AppState;

/// Build the `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(grant: &SessionGrant, secure: bool) -> Result<HeaderValue, CoreError> {
    let secure = if secure { "; Secure" } else { "" };
    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax{secure}",
        grant.session_token
    );
    HeaderValue::from_str(&cookie)
        .map_err(|_| CoreError::Unavailable("Identity provider issued an unusable session token".into()))
}

/// GET /sso-callback
pub async fn sso_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Response> {
    let mut callback = SsoCallback::new(state.config.sso.clone());
    callback.begin()?;

    let secure = !state.config.app_env.is_development();
    let outcome = state
        .identity_provider
        .complete_redirect(&params)
        .await
        .and_then(|grant| session_cookie(&grant, secure));

    let target = callback.finish(&outcome)?.to_string();

    match outcome {
        Ok(cookie) => {
            tracing::info!(%target, "SSO callback completed");
            Ok(([(SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, %target, "SSO callback failed, using fallback route");
            Ok(Redirect::to(&target).into_response())
        }
    }
}
