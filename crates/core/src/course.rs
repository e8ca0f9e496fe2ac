//! Course records as delivered by the RPC service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default number of published courses fetched for the listing page.
pub const COURSE_PAGE_SIZE: u32 = 20;

/// Upper bound accepted for any configured page size.
pub const MAX_COURSE_PAGE_SIZE: u32 = 100;

/// A published course, read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Source of published courses (the typed-RPC service in production).
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch at most `limit` published courses, newest first.
    async fn list_published(&self, limit: u32) -> Result<Vec<Course>, CoreError>;
}

/// Clamp a requested page size into `1..=MAX_COURSE_PAGE_SIZE`.
pub fn bounded_page_size(requested: u32) -> u32 {
    requested.clamp(1, MAX_COURSE_PAGE_SIZE)
}
