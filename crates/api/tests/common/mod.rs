use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use grow_api::auth::jwt::{generate_access_token, JwtConfig};
use grow_api::config::ServerConfig;
use grow_api::router::build_app_router;
use grow_api::state::AppState;
use grow_db::memory::{MemoryAcquiredSkillStore, MemoryProjectStore, MemoryTeamSkillStore};
use grow_events::notifier::NoopNotifier;
use grow_events::EventBus;
use grow_search::indexer::NoopIndexer;

/// Secret used to mint and validate tokens in tests.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Handles to the in-memory stores behind a test app, for seeding
/// fixtures and inspecting state after requests.
pub struct TestStores {
    pub projects: Arc<MemoryProjectStore>,
    pub acquired_skills: Arc<MemoryAcquiredSkillStore>,
    pub team_skills: Arc<MemoryTeamSkillStore>,
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        search: None,
        notifier: None,
    }
}

/// Build the full application router over fresh in-memory stores.
///
/// Goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app() -> (Router, TestStores) {
    let config = test_config();
    let projects = Arc::new(MemoryProjectStore::new());
    let acquired_skills = Arc::new(MemoryAcquiredSkillStore::new());
    let team_skills = Arc::new(MemoryTeamSkillStore::new());

    let state = AppState::new(
        Arc::new(config.clone()),
        projects.clone(),
        acquired_skills.clone(),
        team_skills.clone(),
        Arc::new(NoopIndexer),
        Arc::new(NoopNotifier),
        Arc::new(EventBus::default()),
    );

    let app = build_app_router(state, &config);

    (
        app,
        TestStores {
            projects,
            acquired_skills,
            team_skills,
        },
    )
}

/// Mint a bearer token for the given identity using the test secret.
pub fn bearer_token(object_id: &str, display_name: &str) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    };
    generate_access_token(
        object_id,
        display_name,
        &format!("{object_id}@contoso.test"),
        &config,
    )
    .expect("token generation should succeed")
}

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and no token.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
