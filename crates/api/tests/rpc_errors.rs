//! RPC server errors are relayed to the caller untouched, whatever the
//! environment. Development additionally logs the procedure and message.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_string, send, CapturedLogs, StubCapability, TestApp};
use folio_api::config::AppEnv;

const ERROR_BODY: &str = r#"{"error":{"json":{"message":"db down","code":-32603}}}"#;

async fn failing_rpc_response(app_env: AppEnv, body: &str) -> (StatusCode, String, usize) {
    let mut test = TestApp::new();
    test.app_env = app_env;
    test.rpc = StubCapability::with_status("rpc", StatusCode::INTERNAL_SERVER_ERROR, body);

    let response = send(test.router(), Method::POST, "/api/trpc/course.create", None).await;
    let status = response.status();
    let body = body_string(response).await;
    (status, body, test.rpc.calls())
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_is_relayed_in_development() {
    let (status, body, calls) = failing_rpc_response(AppEnv::Development, ERROR_BODY).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, ERROR_BODY);
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn server_error_is_relayed_in_production() {
    let (status, body, calls) = failing_rpc_response(AppEnv::Production, ERROR_BODY).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, ERROR_BODY);
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn large_error_body_is_relayed_whole_in_development() {
    let message = "x".repeat(70 * 1024);
    let large = format!(r#"{{"error":{{"message":"{message}"}}}}"#);

    let (status, body, _) = failing_rpc_response(AppEnv::Development, &large).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.len(), large.len());
    assert_eq!(body, large);
}

#[tokio::test]
async fn client_errors_pass_through() {
    let mut test = TestApp::new();
    test.app_env = AppEnv::Development;
    test.rpc = StubCapability::with_status("rpc", StatusCode::BAD_REQUEST, r#"{"error":{}}"#);

    let response = send(test.router(), Method::GET, "/api/trpc/course.list", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-capability"], "rpc");
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn development_logs_procedure_and_message() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    failing_rpc_response(AppEnv::Development, ERROR_BODY).await;

    let output = logs.contents();
    assert!(output.contains("RPC request failed"), "{output}");
    assert!(output.contains("path=course.create"), "{output}");
    assert!(output.contains("db down"), "{output}");
}

#[tokio::test]
async fn production_does_not_log_rpc_details() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    failing_rpc_response(AppEnv::Production, ERROR_BODY).await;

    let output = logs.contents();
    assert!(!output.contains("RPC request failed"), "{output}");
    assert!(!output.contains("db down"), "{output}");
}
