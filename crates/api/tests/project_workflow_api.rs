//! HTTP-level integration tests for the `/project-workflow` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Projects are seeded through the store layer to set up scenarios, then
//! exercised and verified through the HTTP API.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{bearer_token, body_json, build_test_app, delete_auth, get_auth, post_json, post_json_auth};
use grow_core::status::ProjectStatus;
use grow_db::models::Project;
use grow_db::store::{AcquiredSkillStore, ProjectStore};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_project(owner: &str, id: &str, status: ProjectStatus, team_size: i32) -> Project {
    let now = Utc::now();
    Project {
        project_id: id.to_string(),
        created_by_user_id: owner.to_string(),
        created_by_name: "Megan Bowen".to_string(),
        title: "Mentoring circle".to_string(),
        description: "Grow together".to_string(),
        required_skills: "coaching;planning".to_string(),
        support_documents: String::new(),
        team_size,
        status: status.as_db(),
        project_participants_user_ids: String::new(),
        project_participants_user_mapping: String::new(),
        project_start_date: now,
        project_end_date: now,
        project_closed_date: None,
        is_removed: false,
        updated_date: now,
        version: 1,
    }
}

fn with_roster(mut project: Project, ids: &str, mapping: &str) -> Project {
    project.project_participants_user_ids = ids.to_string();
    project.project_participants_user_mapping = mapping.to_string();
    project
}

// ---------------------------------------------------------------------------
// Test: workflow endpoints reject unauthenticated callers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_requires_authentication() {
    let (app, _stores) = build_test_app();

    let response = post_json(
        app,
        "/api/project-workflow/join-project",
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: POST join-project adds the token identity to the roster
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_adds_user_and_returns_true() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&sample_project("owner", "p1", ProjectStatus::Active, 3))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada Lovelace");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(true));

    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.project_participants_user_ids, "u1");
    assert_eq!(stored.project_participants_user_mapping, "u1:Ada Lovelace");
}

// ---------------------------------------------------------------------------
// Test: joining a full project returns 400 CAPACITY_EXCEEDED
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_full_project_returns_capacity_exceeded() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 2),
            "u1;u2",
            "u1:Ada;u2:Grace",
        ))
        .await
        .unwrap();

    let token = bearer_token("u3", "Edsger");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CAPACITY_EXCEEDED");

    // Rejection must not mutate the roster.
    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.project_participants_user_ids, "u1;u2");
}

// ---------------------------------------------------------------------------
// Test: joining twice returns 400 ALREADY_JOINED
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_twice_returns_already_joined() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 3),
            "u1",
            "u1:Ada",
        ))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_JOINED");
}

// ---------------------------------------------------------------------------
// Test: joining a missing project returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_missing_project_returns_404() {
    let (app, _stores) = build_test_app();

    let token = bearer_token("u1", "Ada");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "nope", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: joining a closed project returns 400 INVALID_STATE
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_closed_project_returns_invalid_state() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&sample_project("owner", "p1", ProjectStatus::Closed, 3))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");
}

// ---------------------------------------------------------------------------
// Test: a stored "None" status is rejected as corrupt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_project_with_sentinel_status_returns_validation_error() {
    let (app, stores) = build_test_app();
    let mut project = sample_project("owner", "p1", ProjectStatus::Active, 3);
    project.status = 0;
    stores.projects.insert(&project).await.unwrap();

    let token = bearer_token("u1", "Ada");
    let response = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: POST close-project records skills and closes the project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn close_records_skills_and_closes_project() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 3),
            "u1;u2",
            "u1:Ada;u2:Grace",
        ))
        .await
        .unwrap();

    // The owner closes their own project.
    let token = bearer_token("owner", "Megan Bowen");
    let response = post_json_auth(
        app,
        "/api/project-workflow/close-project",
        &token,
        json!({
            "projectId": "p1",
            "projectParticipantDetails": [
                { "userId": "u1", "acquiredSkills": "coaching", "feedback": "Great project" },
                { "userId": "u2", "acquiredSkills": "planning;coaching", "feedback": "" },
            ],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(true));

    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Closed.as_db());
    assert!(stored.project_closed_date.is_some());

    let records = stores.acquired_skills.list_for_user("u1").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].acquired_skills, "coaching");
    assert_eq!(records[0].created_by_name, "Ada");
    assert_eq!(records[0].project_title, "Mentoring circle");
}

// ---------------------------------------------------------------------------
// Test: close with an incomplete details list returns 400 PARTICIPANT_MISMATCH
// ---------------------------------------------------------------------------

#[tokio::test]
async fn close_with_incomplete_details_returns_participant_mismatch() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 3),
            "u1;u2",
            "u1:Ada;u2:Grace",
        ))
        .await
        .unwrap();

    let token = bearer_token("owner", "Megan Bowen");
    let response = post_json_auth(
        app,
        "/api/project-workflow/close-project",
        &token,
        json!({
            "projectId": "p1",
            "projectParticipantDetails": [
                { "userId": "u1", "acquiredSkills": "coaching", "feedback": "only one entry" },
            ],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PARTICIPANT_MISMATCH");

    // Nothing may be mutated on mismatch.
    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Active.as_db());
    assert!(stores
        .acquired_skills
        .list_for_user("u1")
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: closing someone else's project returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn close_unowned_project_returns_404() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&sample_project("owner", "p1", ProjectStatus::Active, 3))
        .await
        .unwrap();

    // The project lookup is keyed by the caller's id, so a non-owner
    // simply does not find the row.
    let token = bearer_token("intruder", "Not The Owner");
    let response = post_json_auth(
        app,
        "/api/project-workflow/close-project",
        &token,
        json!({ "projectId": "p1", "projectParticipantDetails": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: DELETE leave-project removes the token identity from the roster
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leave_removes_user_and_returns_true() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 3),
            "u1;u2",
            "u1:Ada;u2:Grace",
        ))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada");
    let response = delete_auth(
        app,
        "/api/project-workflow/leave-project?projectId=p1&createdByUserId=owner",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(true));

    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.project_participants_user_ids, "u2");
    assert_eq!(stored.project_participants_user_mapping, "u2:Grace");
}

// ---------------------------------------------------------------------------
// Test: leaving a project nobody joined returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leave_empty_roster_returns_404() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&sample_project("owner", "p1", ProjectStatus::Active, 3))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada");
    let response = delete_auth(
        app,
        "/api/project-workflow/leave-project?projectId=p1&createdByUserId=owner",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: join then leave then rejoin works end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_leave_rejoin_roundtrip() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&sample_project("owner", "p1", ProjectStatus::Active, 2))
        .await
        .unwrap();

    let token = bearer_token("u1", "Ada");

    let join = post_json_auth(
        app.clone(),
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;
    assert_eq!(join.status(), StatusCode::OK);

    let leave = delete_auth(
        app.clone(),
        "/api/project-workflow/leave-project?projectId=p1&createdByUserId=owner",
        &token,
    )
    .await;
    assert_eq!(leave.status(), StatusCode::OK);

    let rejoin = post_json_auth(
        app,
        "/api/project-workflow/join-project",
        &token,
        json!({ "projectId": "p1", "createdByUserId": "owner" }),
    )
    .await;
    assert_eq!(rejoin.status(), StatusCode::OK);

    let stored = stores.projects.get("owner", "p1").await.unwrap().unwrap();
    assert_eq!(stored.project_participants_user_ids, "u1");
    // Three applied writes bump the version three times.
    assert_eq!(stored.version, 4);
}

// ---------------------------------------------------------------------------
// Test: GET acquired-skills returns records written by close
// ---------------------------------------------------------------------------

#[tokio::test]
async fn acquired_skills_listed_after_close() {
    let (app, stores) = build_test_app();
    stores
        .projects
        .insert(&with_roster(
            sample_project("owner", "p1", ProjectStatus::Active, 3),
            "u1",
            "u1:Ada",
        ))
        .await
        .unwrap();

    let owner_token = bearer_token("owner", "Megan Bowen");
    let close = post_json_auth(
        app.clone(),
        "/api/project-workflow/close-project",
        &owner_token,
        json!({
            "projectId": "p1",
            "projectParticipantDetails": [
                { "userId": "u1", "acquiredSkills": "coaching", "feedback": "well run" },
            ],
        }),
    )
    .await;
    assert_eq!(close.status(), StatusCode::OK);

    let participant_token = bearer_token("u1", "Ada");
    let response = get_auth(app, "/api/acquiredskill/acquired-skills", &participant_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let records = json.as_array().expect("response should be a JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["projectId"], "p1");
    assert_eq!(records[0]["acquiredSkills"], "coaching");
    assert_eq!(records[0]["feedback"], "well run");
    assert_eq!(records[0]["createdByName"], "Ada");
    assert_eq!(records[0]["projectOwnerName"], "Megan Bowen");
}
