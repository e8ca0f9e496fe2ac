//! Liveness probe. Answers without touching any upstream.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::config::AppEnv;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub env: String,
    pub admins: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let env: AppEnv = state.config.app_env;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        env: env.to_string(),
        admins: state.admins.len(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
