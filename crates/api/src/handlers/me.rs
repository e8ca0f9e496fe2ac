use axum::Json;
use serde::Serialize;

use crate::middleware::auth::Viewer;
use crate::response::DataResponse;

/// Identity and admin gate output for client-side rendering decisions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub signed_in: bool,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_loaded: bool,
}

/// GET /api/me
pub async fn me(viewer: Viewer) -> Json<DataResponse<MeResponse>> {
    Json(DataResponse {
        data: MeResponse {
            signed_in: viewer.user.is_some(),
            email: viewer.email().map(str::to_string),
            is_admin: viewer.admin.is_admin,
            is_loaded: viewer.admin.is_loaded,
        },
    })
}
