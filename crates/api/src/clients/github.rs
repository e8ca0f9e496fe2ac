//! GitHub public events client.

use async_trait::async_trait;
use axum::http::header::{ACCEPT, USER_AGENT};
use folio_core::activity::{ActivityEvent, ActivitySource};
use folio_core::error::CoreError;

pub struct GithubClient {
    api_url: String,
    client: reqwest::Client,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { api_url, client }
    }

    pub fn events_url(&self, username: &str) -> String {
        format!("{}/users/{username}/events/public", self.api_url)
    }
}

#[async_trait]
impl ActivitySource for GithubClient {
    async fn recent_events(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<ActivityEvent>, CoreError> {
        let response = self
            .client
            .get(self.events_url(username))
            .query(&[("per_page", limit)])
            .header(USER_AGENT, concat!("folio/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| CoreError::Unavailable(format!("GitHub events: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Unavailable(format!(
                "GitHub events returned HTTP {status}"
            )));
        }

        response
            .json::<Vec<ActivityEvent>>()
            .await
            .map_err(|e| CoreError::Unavailable(format!("GitHub events: unexpected payload: {e}")))
    }
}
