//! Handlers for the `/acquiredskill` resource.

use axum::extract::State;
use axum::Json;
use grow_db::models::AcquiredSkill;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/acquiredskill/acquired-skills
///
/// Return the acting user's acquired-skill records, newest closure
/// first. These rows back the "skills acquired" tab and are written by
/// the close operation.
pub async fn list_acquired_skills(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AcquiredSkill>>> {
    let records = state.acquired_skills.list_for_user(&auth.object_id).await?;
    Ok(Json(records))
}
