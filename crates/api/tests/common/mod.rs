//! Shared helpers for the HTTP integration tests.
//!
//! The router is the real one from `folio_api::router`; only the external
//! collaborators (capability upstreams, RPC, GitHub, identity provider) are
//! replaced by in-process stubs.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_api::auth::session::{sign_session, SessionConfig};
use folio_api::capabilities::{Capabilities, CapabilityHandler};
use folio_api::config::{AppEnv, ServerConfig, UpstreamConfig};
use folio_api::pages::Templates;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::activity::{ActivityEvent, ActivitySource};
use folio_core::admin::DEFAULT_ADMIN_EMAILS;
use folio_core::content::{ContentDraft, ContentPublisher, ContentType, CreatedContent};
use folio_core::course::{Course, CourseSource};
use folio_core::error::CoreError;
use folio_core::sso::{CallbackParams, IdentityProvider, RedirectTargets, SessionGrant};

pub const TEST_SECRET: &str = "integration-test-secret-long-enough";
pub const ADMIN_EMAIL: &str = "s.filimon@legionedge.ai";
pub const SSO_SUCCESS: &str = "/welcome";
pub const SSO_FALLBACK: &str = "/sign-in-failed";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(app_env: AppEnv) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        app_env,
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
        },
        admin_emails: DEFAULT_ADMIN_EMAILS.iter().map(|e| e.to_string()).collect(),
        upstreams: UpstreamConfig {
            auth_url: "http://auth.invalid".to_string(),
            jobs_url: "http://jobs.invalid".to_string(),
            rpc_url: "http://rpc.invalid".to_string(),
            timeout_secs: 1,
        },
        sso: RedirectTargets {
            success: SSO_SUCCESS.to_string(),
            fallback: SSO_FALLBACK.to_string(),
        },
        github_username: "octo".to_string(),
        github_api_url: "http://github.invalid".to_string(),
        course_page_size: 20,
    }
}

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Capability stub: answers with its own name so tests can see who handled
/// a request.
pub struct StubCapability {
    pub name: &'static str,
    pub status: StatusCode,
    pub body: String,
    pub calls: AtomicUsize,
}

impl StubCapability {
    pub fn ok(name: &'static str) -> Arc<Self> {
        Self::with_status(name, StatusCode::OK, "")
    }

    pub fn with_status(name: &'static str, status: StatusCode, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name,
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityHandler for StubCapability {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, request: Request) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = if self.body.is_empty() {
            format!("{} {} {}", self.name, request.method(), request.uri())
        } else {
            self.body.clone()
        };
        (self.status, [("x-capability", self.name)], body).into_response()
    }
}

pub struct StubCourses {
    pub result: Result<Vec<Course>, String>,
    pub requested_limits: Mutex<Vec<u32>>,
}

impl StubCourses {
    pub fn ok(courses: Vec<Course>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(courses),
            requested_limits: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            requested_limits: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CourseSource for StubCourses {
    async fn list_published(&self, limit: u32) -> Result<Vec<Course>, CoreError> {
        self.requested_limits.lock().unwrap().push(limit);
        self.result.clone().map_err(CoreError::Unavailable)
    }
}

pub struct StubPublisher {
    pub fail: bool,
    pub created: Mutex<Vec<(ContentType, ContentDraft)>>,
}

impl StubPublisher {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            created: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ContentPublisher for StubPublisher {
    async fn create(
        &self,
        kind: ContentType,
        draft: &ContentDraft,
    ) -> Result<CreatedContent, CoreError> {
        if self.fail {
            return Err(CoreError::Unavailable("rpc down".into()));
        }
        self.created.lock().unwrap().push((kind, draft.clone()));
        Ok(CreatedContent {
            id: "content_1".to_string(),
            slug: draft.slug.clone(),
        })
    }
}

pub struct StubActivity {
    pub result: Result<Vec<ActivityEvent>, String>,
}

#[async_trait]
impl ActivitySource for StubActivity {
    async fn recent_events(
        &self,
        _username: &str,
        _limit: u32,
    ) -> Result<Vec<ActivityEvent>, CoreError> {
        self.result.clone().map_err(CoreError::Unavailable)
    }
}

pub struct StubIdentity {
    pub result: Result<String, String>,
    pub calls: AtomicUsize,
}

impl StubIdentity {
    pub fn succeeding(token: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(token.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn complete_redirect(&self, _params: &CallbackParams) -> Result<SessionGrant, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map(|session_token| SessionGrant { session_token })
            .map_err(CoreError::Unauthorized)
    }
}

// ---------------------------------------------------------------------------
// App builder
// ---------------------------------------------------------------------------

/// All stubs wired into one app. Tweak fields before calling [`TestApp::router`].
pub struct TestApp {
    pub app_env: AppEnv,
    pub auth: Arc<StubCapability>,
    pub jobs: Arc<StubCapability>,
    pub rpc: Arc<StubCapability>,
    pub courses: Arc<StubCourses>,
    pub publisher: Arc<StubPublisher>,
    pub activity: Arc<StubActivity>,
    pub identity: Arc<StubIdentity>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            app_env: AppEnv::Test,
            auth: StubCapability::ok("auth"),
            jobs: StubCapability::ok("jobs"),
            rpc: StubCapability::ok("rpc"),
            courses: StubCourses::ok(Vec::new()),
            publisher: StubPublisher::new(false),
            activity: Arc::new(StubActivity { result: Ok(Vec::new()) }),
            identity: StubIdentity::succeeding("session.jwt.token"),
        }
    }

    pub fn router(&self) -> Router {
        let config = test_config(self.app_env);
        let state = AppState {
            admins: Arc::new(config.admin_allow_list()),
            config: Arc::new(config),
            templates: Arc::new(Templates::load().expect("templates compile")),
            capabilities: Capabilities {
                auth: self.auth.clone(),
                jobs: self.jobs.clone(),
                rpc: self.rpc.clone(),
            },
            courses: self.courses.clone(),
            publisher: self.publisher.clone(),
            activity: self.activity.clone(),
            identity_provider: self.identity.clone(),
        };
        build_app_router(state)
    }
}

/// Router with default stubs.
pub fn build_test_app() -> Router {
    TestApp::new().router()
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's `tracing` output into the sink until the guard
    /// drops. `#[tokio::test]` runs on one thread, so the whole request is
    /// covered.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Session token for the given email, signed with the test secret.
pub fn session_for(email: Option<&str>) -> String {
    let config = SessionConfig {
        secret: TEST_SECRET.to_string(),
    };
    sign_session("user_test", email, 3600, &config).expect("token signing should succeed")
}

pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token)).await
}

pub async fn post_form(app: Router, uri: &str, form: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
