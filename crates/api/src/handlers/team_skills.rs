//! Handlers for the `/teamskills` resource.
//!
//! Configured skills drive the filter bar and the skill picker in the
//! closure dialog. One row per team, semicolon-joined tags on the wire.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use grow_core::error::CoreError;
use grow_core::skills::{join_tags, parse_tags, validate_team_skills};
use grow_db::models::{TeamSkill, UpsertTeamSkill};
use grow_events::bus::EVENT_TEAM_SKILLS_UPDATED;
use grow_events::PlatformEvent;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the team skill lookups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSkillQuery {
    pub team_id: String,
}

fn require_team_id(team_id: &str) -> Result<&str, CoreError> {
    let trimmed = team_id.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Team id must not be empty".into()));
    }
    Ok(trimmed)
}

/// GET /api/teamskills
///
/// Return the team's configured skill entity, or JSON `null` when the
/// team has not configured any skills yet.
pub async fn get_team_skills(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TeamSkillQuery>,
) -> AppResult<Json<Option<TeamSkill>>> {
    let team_id = require_team_id(&params.team_id)?;
    let entity = state.team_skills.get(team_id).await?;
    Ok(Json(entity))
}

/// POST /api/teamskills
///
/// Create or replace the team's configured skills. The acting user is
/// stamped as creator on first write and as updater afterwards.
pub async fn upsert_team_skills(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpsertTeamSkill>,
) -> AppResult<Json<bool>> {
    let team_id = require_team_id(&payload.team_id)?.to_string();
    validate_team_skills(&payload.skills)?;

    let now = Utc::now();
    let entity = TeamSkill {
        team_id: team_id.clone(),
        // Store the normalized form: trimmed tags, duplicates dropped.
        skills: join_tags(&parse_tags(&payload.skills)),
        created_by_user_id: auth.object_id.clone(),
        updated_by_user_id: auth.object_id.clone(),
        created_date: now,
        updated_date: now,
    };
    state.team_skills.upsert(&entity).await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_TEAM_SKILLS_UPDATED)
            .with_source("team", team_id)
            .with_actor(auth.object_id),
    );
    Ok(Json(true))
}

/// GET /api/teamskills/configured-skills
///
/// Return the team's configured skills as a parsed tag list, empty when
/// the team has none.
pub async fn configured_skills(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TeamSkillQuery>,
) -> AppResult<Json<Vec<String>>> {
    let team_id = require_team_id(&params.team_id)?;
    let entity = state.team_skills.get(team_id).await?;
    let tags = entity.map(|e| parse_tags(&e.skills)).unwrap_or_default();
    Ok(Json(tags))
}
