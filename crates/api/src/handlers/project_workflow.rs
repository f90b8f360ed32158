//! Handlers for the `/project-workflow` resource.
//!
//! All endpoints require authentication via [`AuthUser`]; the acting
//! user's id and display name always come from the token claims, never
//! from the request body. Successful calls answer with a bare JSON `true`,
//! the contract the Teams client expects.

use axum::extract::{Query, State};
use axum::Json;
use grow_core::closure::ParticipantDetail;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /project-workflow/join-project`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinProjectRequest {
    pub project_id: String,
    /// Owner id, part of the storage key of the project being joined.
    pub created_by_user_id: String,
}

/// One participant's entry in a close request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub user_id: String,
    /// Semicolon-joined skill tags, at most three.
    #[serde(default)]
    pub acquired_skills: String,
    #[serde(default)]
    pub feedback: String,
}

impl From<ParticipantDetailDto> for ParticipantDetail {
    fn from(dto: ParticipantDetailDto) -> Self {
        ParticipantDetail {
            user_id: dto.user_id,
            acquired_skills: dto.acquired_skills,
            feedback: dto.feedback,
        }
    }
}

/// Body of `POST /project-workflow/close-project`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseProjectRequest {
    pub project_id: String,
    /// Per-participant skills and feedback collected in the closure
    /// dialog. May be omitted for a project nobody joined.
    #[serde(default)]
    pub project_participant_details: Vec<ParticipantDetailDto>,
}

/// Query parameters of `DELETE /project-workflow/leave-project`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveProjectQuery {
    pub project_id: String,
    /// Owner id, part of the storage key of the project being left.
    pub created_by_user_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/project-workflow/join-project
///
/// Add the acting user to the project's roster.
pub async fn join_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<JoinProjectRequest>,
) -> AppResult<Json<bool>> {
    state
        .workflow
        .join_project(&auth, &payload.created_by_user_id, &payload.project_id)
        .await?;
    Ok(Json(true))
}

/// POST /api/project-workflow/close-project
///
/// Close a project owned by the acting user, recording one
/// acquired-skill record per roster member.
pub async fn close_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CloseProjectRequest>,
) -> AppResult<Json<bool>> {
    let details: Vec<ParticipantDetail> = payload
        .project_participant_details
        .into_iter()
        .map(ParticipantDetail::from)
        .collect();

    state
        .workflow
        .close_project(&auth, &payload.project_id, &details)
        .await?;
    Ok(Json(true))
}

/// DELETE /api/project-workflow/leave-project?projectId=&createdByUserId=
///
/// Remove the acting user from the project's roster.
pub async fn leave_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LeaveProjectQuery>,
) -> AppResult<Json<bool>> {
    state
        .workflow
        .leave_project(&auth, &params.created_by_user_id, &params.project_id)
        .await?;
    Ok(Json(true))
}
