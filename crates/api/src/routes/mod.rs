pub mod health;

use axum::middleware::from_fn_with_state;
use axum::routing::{any, get};
use axum::Router;

use crate::handlers::{admin, assets, capabilities, courses, fallback, github, home, me, resources, sso};
use crate::middleware::admin::require_admin;
use crate::pages::SITE_CSS_PATH;
use crate::state::AppState;

/// Capability dispatch table.
///
/// ```text
/// /api/auth/{*path}        ANY              -> auth capability
/// /api/inngest             GET, POST, PUT   -> job-webhook capability
/// /api/trpc/{*path}        GET, POST        -> RPC capability
/// ```
///
/// Other verbs on a matched path, HEAD included, are answered with 405.
pub fn capability_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/{*path}", any(capabilities::auth))
        .route(
            "/api/inngest",
            get(capabilities::jobs)
                .post(capabilities::jobs)
                .put(capabilities::jobs)
                .head(capabilities::head_not_allowed),
        )
        .route(
            "/api/trpc/{*path}",
            get(capabilities::rpc)
                .post(capabilities::rpc)
                .head(capabilities::head_not_allowed),
        )
}

/// Rendered pages and the small JSON surface used by the pages.
///
/// ```text
/// /                         GET         landing page
/// /courses                  GET         published courses
/// /github                   GET         GitHub activity
/// /sso-callback             GET         SSO completion
/// /resources                GET         resource index
/// /resources/{framework}    GET         resource page (404 view if unknown)
/// /api/me                   GET         identity + admin status
/// /static/site.css          GET         embedded stylesheet
/// /admin                    GET         -> /admin/create?type=course   (admin only)
/// /admin/create             GET, POST   content creation               (admin only)
/// ```
pub fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/courses", get(courses::courses_page))
        .route("/github", get(github::github_page))
        .route("/sso-callback", get(sso::sso_callback))
        .route("/resources", get(resources::resource_index))
        .route("/resources/{framework}", get(resources::resource_page))
        .route("/api/me", get(me::me))
        .route(SITE_CSS_PATH, get(assets::site_css))
        .nest("/admin", admin_routes(state))
}

/// Everything under `/admin`, including unknown paths, passes the
/// interception gate first.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(admin::admin_index))
        .route(
            "/create",
            get(admin::create_form).post(admin::create_content),
        )
        .fallback(fallback::not_found)
        .layer(from_fn_with_state(state, require_admin))
}
