//! HTTP-level integration tests for bearer-token authentication.
//!
//! Access tokens are minted upstream during tab single sign-on; the API
//! only validates them. These tests exercise the extraction and validation
//! paths through a protected endpoint.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};
use common::{bearer_token, body_json, build_test_app, get, get_auth, TEST_JWT_SECRET};
use grow_api::auth::jwt::{generate_access_token, JwtConfig};
use tower::ServiceExt;

const PROTECTED_URI: &str = "/api/acquiredskill/acquired-skills";

// ---------------------------------------------------------------------------
// Test: a missing Authorization header is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_authorization_header_returns_401() {
    let (app, _stores) = build_test_app();

    let response = get(app, PROTECTED_URI).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

// ---------------------------------------------------------------------------
// Test: a non-Bearer scheme is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_authorization_scheme_returns_401() {
    let (app, _stores) = build_test_app();

    let request = Request::builder()
        .uri(PROTECTED_URI)
        .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

// ---------------------------------------------------------------------------
// Test: a token that is not a JWT is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn garbage_token_returns_401() {
    let (app, _stores) = build_test_app();

    let response = get_auth(app, PROTECTED_URI, "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: a token signed with a different secret is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_with_wrong_secret_returns_401() {
    let (app, _stores) = build_test_app();

    let foreign = JwtConfig {
        secret: "some-other-signing-secret".to_string(),
        access_token_expiry_mins: 60,
    };
    let token = generate_access_token("u1", "Ada", "u1@contoso.test", &foreign).unwrap();

    let response = get_auth(app, PROTECTED_URI, &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: an expired token is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expired_token_returns_401() {
    let (app, _stores) = build_test_app();

    // A negative lifetime mints a token that expired well past the
    // validator's leeway.
    let expired = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: -10,
    };
    let token = generate_access_token("u1", "Ada", "u1@contoso.test", &expired).unwrap();

    let response = get_auth(app, PROTECTED_URI, &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: a valid bearer token reaches the handler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_token_is_accepted() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("11f43b6e-5034-4f61-a929-3a1b107972c4", "Adele Vance");
    let response = get_auth(app, PROTECTED_URI, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    // A fresh user has no acquired skills yet.
    assert_eq!(body_json(response).await, serde_json::json!([]));
}
