//! Team skill entity model and DTOs.

use grow_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Configured skills for a team, keyed by `team_id`. The skills column is
/// the semicolon-joined tag list shown in the filter bar and the project
/// tagging dialog.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSkill {
    pub team_id: EntityId,
    pub skills: String,
    pub created_by_user_id: EntityId,
    pub updated_by_user_id: EntityId,
    pub created_date: Timestamp,
    pub updated_date: Timestamp,
}

/// DTO for configuring a team's skills. The acting user is stamped from
/// the caller's identity, never from the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTeamSkill {
    pub team_id: EntityId,
    pub skills: String,
}
