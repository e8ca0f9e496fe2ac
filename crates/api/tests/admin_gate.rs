//! Integration tests for the admin gate and admin content creation.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, body_string, get, get_auth, location, post_form, send, session_for, TestApp,
    ADMIN_EMAIL,
};
use folio_core::content::ContentType;

const VALID_DRAFT: &str =
    "title=Rust+for+Web+Devs&slug=rust-for-web-devs&summary=Intro&body=Hello&published=on";

// ---------------------------------------------------------------------------
// Interception gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_admin_visit_redirects_home() {
    let response = get(common::build_test_app(), "/admin/create?type=course").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn non_admin_admin_visit_redirects_home() {
    let token = session_for(Some("student@example.com"));
    let response = get_auth(common::build_test_app(), "/admin/create", &token).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn session_without_email_is_not_admin() {
    let token = session_for(None);
    let response = get_auth(common::build_test_app(), "/admin/create", &token).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn unknown_admin_subpath_is_gated_too() {
    let response = get(common::build_test_app(), "/admin/settings").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn admin_sees_unknown_admin_subpath_as_not_found() {
    let token = session_for(Some(ADMIN_EMAIL));
    let response = get_auth(common::build_test_app(), "/admin/settings", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("id=\"not-found\""));
}

#[tokio::test]
async fn admin_email_match_is_case_insensitive() {
    let token = session_for(Some("S.Filimon@LegionEdge.AI"));
    let response = get_auth(common::build_test_app(), "/admin/create?type=post", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<h1>New Blog post</h1>"));
    assert!(html.contains("action=\"/admin/create?type=post\""));
}

#[tokio::test]
async fn admin_root_redirects_to_course_form() {
    let token = session_for(Some(ADMIN_EMAIL));
    let response = get_auth(common::build_test_app(), "/admin", &token).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/create?type=course");
}

#[tokio::test]
async fn non_admin_post_is_forbidden() {
    let test = TestApp::new();
    let token = session_for(Some("student@example.com"));

    let response = post_form(test.router(), "/admin/create?type=course", VALID_DRAFT, Some(token.as_str())).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert!(test.publisher.created.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Admin link and /api/me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_link_rendered_only_for_admins() {
    let test = TestApp::new();

    let html = body_string(get(test.router(), "/").await).await;
    assert!(!html.contains("id=\"admin-link\""));

    let token = session_for(Some("student@example.com"));
    let html = body_string(get_auth(test.router(), "/", &token).await).await;
    assert!(!html.contains("id=\"admin-link\""));

    let token = session_for(Some(ADMIN_EMAIL));
    let html = body_string(get_auth(test.router(), "/", &token).await).await;
    assert!(html.contains("id=\"admin-link\""));
}

#[tokio::test]
async fn me_reports_signed_out() {
    let response = get(common::build_test_app(), "/api/me").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["signedIn"], false);
    assert_eq!(json["data"]["isAdmin"], false);
    assert_eq!(json["data"]["isLoaded"], true);
    assert!(json["data"]["email"].is_null());
}

#[tokio::test]
async fn me_reports_admin() {
    let token = session_for(Some(ADMIN_EMAIL));
    let json = body_json(get_auth(common::build_test_app(), "/api/me", &token).await).await;

    assert_eq!(json["data"]["signedIn"], true);
    assert_eq!(json["data"]["email"], ADMIN_EMAIL);
    assert_eq!(json["data"]["isAdmin"], true);
}

#[tokio::test]
async fn invalid_token_is_treated_as_signed_out() {
    let json = body_json(get_auth(common::build_test_app(), "/api/me", "not-a-jwt").await).await;

    assert_eq!(json["data"]["signedIn"], false);
    assert_eq!(json["data"]["isAdmin"], false);
}

// ---------------------------------------------------------------------------
// Content creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_creates_course_and_is_redirected() {
    let test = TestApp::new();
    let token = session_for(Some(ADMIN_EMAIL));

    let response = post_form(test.router(), "/admin/create?type=course", VALID_DRAFT, Some(token.as_str())).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/admin/create?type=course&created=rust-for-web-devs"
    );

    let created = test.publisher.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    let (kind, draft) = &created[0];
    assert_eq!(*kind, ContentType::Course);
    assert_eq!(draft.title, "Rust for Web Devs");
    assert!(draft.published);
}

#[tokio::test]
async fn created_notice_is_rendered() {
    let token = session_for(Some(ADMIN_EMAIL));
    let response = get_auth(
        common::build_test_app(),
        "/admin/create?type=course&created=rust-for-web-devs",
        &token,
    )
    .await;

    let html = body_string(response).await;
    assert!(html.contains("id=\"created-notice\""));
    assert!(html.contains("rust-for-web-devs"));
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_publishing() {
    let test = TestApp::new();
    let token = session_for(Some(ADMIN_EMAIL));

    let response = post_form(
        test.router(),
        "/admin/create?type=post",
        "title=&slug=Not+A+Slug&body=",
        Some(token.as_str()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(test.publisher.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_content_type_is_bad_request() {
    let token = session_for(Some(ADMIN_EMAIL));

    let response = get_auth(common::build_test_app(), "/admin/create?type=podcast", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        common::build_test_app(),
        Method::GET,
        "/admin/create?type=Resource",
        Some(token.as_str()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn publisher_failure_is_bad_gateway() {
    let mut test = TestApp::new();
    test.publisher = common::StubPublisher::new(true);
    let token = session_for(Some(ADMIN_EMAIL));

    let response = post_form(test.router(), "/admin/create?type=resource", VALID_DRAFT, Some(token.as_str())).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_UNAVAILABLE");
}
