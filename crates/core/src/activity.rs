//! GitHub public activity shown on `/github`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of events requested from GitHub per page render.
pub const ACTIVITY_PAGE_SIZE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRepo {
    pub name: String,
}

/// One entry from the GitHub public events feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: ActivityRepo,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ActivityEvent {
    /// Human label for the event type, e.g. `PushEvent` -> `push`.
    pub fn label(&self) -> String {
        let trimmed = self.kind.strip_suffix("Event").unwrap_or(&self.kind);
        let mut label = String::with_capacity(trimmed.len() + 4);
        for (i, ch) in trimmed.chars().enumerate() {
            if ch.is_uppercase() && i > 0 {
                label.push(' ');
            }
            label.extend(ch.to_lowercase());
        }
        label
    }

    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.repo.name)
    }
}

#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn recent_events(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<ActivityEvent>, CoreError>;
}
