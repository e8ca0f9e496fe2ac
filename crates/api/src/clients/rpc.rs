//! Client for the typed-RPC service.
//!
//! Speaks the RPC service's HTTP convention: queries are
//! `GET /api/trpc/<procedure>?input=<json>`, mutations are
//! `POST /api/trpc/<procedure>` with a JSON body. Successful responses carry
//! `{ "result": { "data": ... } }`, optionally wrapped once more in
//! `{ "json": ... }` by the service's serializer.

use async_trait::async_trait;
use folio_core::content::{ContentDraft, ContentPublisher, ContentType, CreatedContent};
use folio_core::course::{Course, CourseSource};
use folio_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Procedure listing published courses.
pub const LIST_PUBLISHED_COURSES: &str = "course.list";

pub struct RpcClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Envelope {
    result: Option<ResultBody>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct ResultBody {
    data: Value,
}

/// Course listings arrive either as a bare array or as a page object.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoursePage {
    Items(Vec<Course>),
    Page { items: Vec<Course> },
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/api/trpc/{procedure}", self.base_url)
    }

    async fn query<T: DeserializeOwned>(&self, procedure: &str, input: &Value) -> Result<T, CoreError> {
        let response = self
            .client
            .get(self.procedure_url(procedure))
            .query(&[("input", input.to_string())])
            .send()
            .await
            .map_err(|e| unavailable(procedure, e))?;
        decode(procedure, response).await
    }

    async fn mutate<T: DeserializeOwned>(&self, procedure: &str, input: &Value) -> Result<T, CoreError> {
        let response = self
            .client
            .post(self.procedure_url(procedure))
            .json(input)
            .send()
            .await
            .map_err(|e| unavailable(procedure, e))?;
        decode(procedure, response).await
    }
}

fn unavailable(procedure: &str, err: reqwest::Error) -> CoreError {
    CoreError::Unavailable(format!("RPC {procedure}: {err}"))
}

async fn decode<T: DeserializeOwned>(
    procedure: &str,
    response: reqwest::Response,
) -> Result<T, CoreError> {
    let status = response.status();
    let envelope: Envelope = response
        .json()
        .await
        .map_err(|e| CoreError::Unavailable(format!("RPC {procedure}: unreadable response ({status}): {e}")))?;

    if let Some(error) = envelope.error {
        return Err(classify_error(procedure, status, &error));
    }
    if !status.is_success() {
        return Err(CoreError::Unavailable(format!("RPC {procedure} returned HTTP {status}")));
    }

    let data = envelope
        .result
        .map(|r| unwrap_serialized(r.data))
        .ok_or_else(|| CoreError::Unavailable(format!("RPC {procedure}: response has no result")))?;

    serde_json::from_value(data)
        .map_err(|e| CoreError::Unavailable(format!("RPC {procedure}: unexpected payload: {e}")))
}

/// Strip the serializer's `{ "json": ... }` wrapper when present.
pub fn unwrap_serialized(data: Value) -> Value {
    match data {
        Value::Object(mut map) if map.len() <= 2 && map.contains_key("json") => {
            map.remove("json").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Map an RPC error object onto a domain error.
///
/// Client-side faults the service reports by code (bad input, duplicate slug,
/// missing procedure) keep their meaning; everything else is an outage.
pub fn classify_error(procedure: &str, status: reqwest::StatusCode, error: &Value) -> CoreError {
    let message = error_message(error);
    let code = error
        .get("json")
        .unwrap_or(error)
        .pointer("/data/code")
        .and_then(Value::as_str);

    match code {
        Some("BAD_REQUEST") => CoreError::Validation(message),
        Some("CONFLICT") => CoreError::Conflict(message),
        Some("NOT_FOUND") => CoreError::NotFound {
            entity: "RPC procedure",
            key: procedure.to_string(),
        },
        _ => CoreError::Unavailable(format!("RPC {procedure} failed ({status}): {message}")),
    }
}

/// Best-effort human message from an RPC error object.
pub fn error_message(error: &Value) -> String {
    let error = error.get("json").unwrap_or(error);
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

#[async_trait]
impl CourseSource for RpcClient {
    async fn list_published(&self, limit: u32) -> Result<Vec<Course>, CoreError> {
        let input = json!({ "published": true, "limit": limit });
        let page: CoursePage = self.query(LIST_PUBLISHED_COURSES, &input).await?;
        let mut courses = match page {
            CoursePage::Items(items) | CoursePage::Page { items } => items,
        };
        courses.truncate(limit as usize);
        Ok(courses)
    }
}

#[async_trait]
impl ContentPublisher for RpcClient {
    async fn create(
        &self,
        kind: ContentType,
        draft: &ContentDraft,
    ) -> Result<CreatedContent, CoreError> {
        let input = serde_json::to_value(draft)
            .map_err(|e| CoreError::Internal(format!("Failed to encode draft: {e}")))?;
        self.mutate(&kind.create_procedure(), &input).await
    }
}
