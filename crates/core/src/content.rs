//! Content types and drafts created from the admin area.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_SLUG_LEN: usize = 80;
pub const MAX_SUMMARY_LEN: usize = 300;

/// Kinds of content the admin area can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Course,
    Post,
    Resource,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Course, ContentType::Post, ContentType::Resource];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Course => "course",
            ContentType::Post => "post",
            ContentType::Resource => "resource",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Course => "Course",
            ContentType::Post => "Blog post",
            ContentType::Resource => "Resource",
        }
    }

    /// RPC procedure that persists content of this type.
    pub fn create_procedure(&self) -> String {
        format!("{}.create", self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "course" => Ok(ContentType::Course),
            "post" => Ok(ContentType::Post),
            "resource" => Ok(ContentType::Resource),
            other => Err(CoreError::Validation(format!(
                "Unknown content type '{other}'. Expected one of: course, post, resource"
            ))),
        }
    }
}

/// Form payload submitted from `/admin/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDraft {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    pub body: String,
    /// HTML checkboxes submit `"on"` or nothing at all.
    #[serde(default, deserialize_with = "checkbox")]
    pub published: bool,
}

impl ContentDraft {
    /// Validate the draft.
    ///
    /// Returns an empty `Vec` if valid; otherwise a list of human-readable errors.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            errors.push("Title must not be empty".to_string());
        } else if title_len > MAX_TITLE_LEN {
            errors.push(format!("Title must be at most {MAX_TITLE_LEN} characters"));
        }

        if self.slug.is_empty() {
            errors.push("Slug must not be empty".to_string());
        } else if self.slug.len() > MAX_SLUG_LEN {
            errors.push(format!("Slug must be at most {MAX_SLUG_LEN} characters"));
        } else if !is_kebab_slug(&self.slug) {
            errors.push("Slug must be lower-case kebab-case (a-z, 0-9, '-')".to_string());
        }

        if self.summary.chars().count() > MAX_SUMMARY_LEN {
            errors.push(format!(
                "Summary must be at most {MAX_SUMMARY_LEN} characters"
            ));
        }

        if self.body.trim().is_empty() {
            errors.push("Body must not be empty".to_string());
        }

        errors
    }

    /// Validate, folding all messages into a single [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors.join("; ")))
        }
    }
}

fn is_kebab_slug(slug: &str) -> bool {
    !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(raw.as_str(), "on" | "true" | "1"))
}

/// Identifier handed back by the RPC service after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedContent {
    pub id: String,
    pub slug: String,
}

/// Persists admin-created content (the typed-RPC service in production).
#[async_trait]
pub trait ContentPublisher: Send + Sync {
    async fn create(
        &self,
        kind: ContentType,
        draft: &ContentDraft,
    ) -> Result<CreatedContent, CoreError>;
}
