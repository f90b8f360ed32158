//! HTTP-level integration tests for the `/teamskills` endpoints.

mod common;

use axum::http::StatusCode;
use common::{bearer_token, body_json, build_test_app, get, get_auth, post_json_auth};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: team skill endpoints reject unauthenticated callers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_skills_require_authentication() {
    let (app, _stores) = build_test_app();

    let response = get(app, "/api/teamskills?teamId=t1").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: GET for a team with no configuration returns JSON null
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unconfigured_team_returns_null() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = get_auth(app, "/api/teamskills?teamId=t1", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(null));
}

// ---------------------------------------------------------------------------
// Test: POST configures skills and GET returns the normalized form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_then_get_returns_normalized_skills() {
    let (app, _stores) = build_test_app();
    let token = bearer_token("hr1", "Nestor Wilke");

    let upsert = post_json_auth(
        app.clone(),
        "/api/teamskills",
        &token,
        json!({ "teamId": "t1", "skills": "rust; sql ;rust" }),
    )
    .await;
    assert_eq!(upsert.status(), StatusCode::OK);
    assert_eq!(body_json(upsert).await, json!(true));

    let response = get_auth(app, "/api/teamskills?teamId=t1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["teamId"], "t1");
    // Tags are trimmed and de-duplicated before storage.
    assert_eq!(json["skills"], "rust;sql");
    assert_eq!(json["createdByUserId"], "hr1");
    assert_eq!(json["updatedByUserId"], "hr1");
}

// ---------------------------------------------------------------------------
// Test: a second upsert keeps the creator and stamps the updater
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_upsert_preserves_creator_and_stamps_updater() {
    let (app, _stores) = build_test_app();

    let first = post_json_auth(
        app.clone(),
        "/api/teamskills",
        &bearer_token("hr1", "Nestor Wilke"),
        json!({ "teamId": "t1", "skills": "rust" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json_auth(
        app.clone(),
        "/api/teamskills",
        &bearer_token("hr2", "Patti Fernandez"),
        json!({ "teamId": "t1", "skills": "rust;sql" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let response = get_auth(
        app,
        "/api/teamskills?teamId=t1",
        &bearer_token("hr1", "Nestor Wilke"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["skills"], "rust;sql");
    assert_eq!(json["createdByUserId"], "hr1");
    assert_eq!(json["updatedByUserId"], "hr2");
}

// ---------------------------------------------------------------------------
// Test: GET configured-skills returns the parsed tag list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configured_skills_returns_parsed_list() {
    let (app, _stores) = build_test_app();
    let token = bearer_token("hr1", "Nestor Wilke");

    let upsert = post_json_auth(
        app.clone(),
        "/api/teamskills",
        &token,
        json!({ "teamId": "t1", "skills": "rust;sql;design" }),
    )
    .await;
    assert_eq!(upsert.status(), StatusCode::OK);

    let response = get_auth(app, "/api/teamskills/configured-skills?teamId=t1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(["rust", "sql", "design"]));
}

// ---------------------------------------------------------------------------
// Test: configured-skills for an unconfigured team is an empty list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configured_skills_empty_for_unconfigured_team() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = get_auth(app, "/api/teamskills/configured-skills?teamId=t9", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// ---------------------------------------------------------------------------
// Test: configuring more than five skills is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_with_too_many_skills_is_rejected() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = post_json_auth(
        app,
        "/api/teamskills",
        &token,
        json!({ "teamId": "t1", "skills": "a;b;c;d;e;f" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: configuring an effectively empty skill list is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_with_no_skills_is_rejected() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = post_json_auth(
        app,
        "/api/teamskills",
        &token,
        json!({ "teamId": "t1", "skills": " ;; " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a blank teamId query value is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_team_id_is_validation_error() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = get_auth(app, "/api/teamskills?teamId=", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a missing teamId query parameter is a 400 from the extractor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_team_id_query_is_bad_request() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("hr1", "Nestor Wilke");
    let response = get_auth(app, "/api/teamskills", &token).await;

    // Axum's Query extractor rejects before the handler runs, so only the
    // status is ours to assert.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
