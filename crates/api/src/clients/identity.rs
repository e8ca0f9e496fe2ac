//! Identity-provider client used by the SSO callback.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::sso::{CallbackParams, IdentityProvider, SessionGrant};

/// Provider endpoint that exchanges callback parameters for a session.
pub const COMPLETE_PATH: &str = "/v1/sso/complete";

pub struct AuthProviderClient {
    base_url: String,
    client: reqwest::Client,
}

impl AuthProviderClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }
}

#[async_trait]
impl IdentityProvider for AuthProviderClient {
    async fn complete_redirect(&self, params: &CallbackParams) -> Result<SessionGrant, CoreError> {
        if let Some(error) = params.get("error") {
            let detail = params.get("error_description").unwrap_or(error);
            return Err(CoreError::Unauthorized(format!(
                "Identity provider reported: {detail}"
            )));
        }

        let response = self
            .client
            .post(format!("{}{COMPLETE_PATH}", self.base_url))
            .json(params)
            .send()
            .await
            .map_err(|e| CoreError::Unavailable(format!("SSO completion: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Unauthorized(format!(
                "SSO completion rejected with HTTP {status}"
            )));
        }

        response
            .json::<SessionGrant>()
            .await
            .map_err(|e| CoreError::Unavailable(format!("SSO completion: unexpected payload: {e}")))
    }
}
