//! Project entity model.

use grow_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table, keyed by
/// `(created_by_user_id, project_id)`.
///
/// `status` holds the raw smallint; decode it with
/// `grow_core::status::ProjectStatus::from_db`. The two participant columns
/// hold the semicolon transport form of the roster and stay in lockstep.
/// `version` is the optimistic-concurrency token: every applied update
/// increments it, and updates carry the version observed at read.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: EntityId,
    pub created_by_user_id: EntityId,
    pub created_by_name: String,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub support_documents: String,
    pub team_size: i32,
    pub status: i16,
    pub project_participants_user_ids: String,
    pub project_participants_user_mapping: String,
    pub project_start_date: Timestamp,
    pub project_end_date: Timestamp,
    pub project_closed_date: Option<Timestamp>,
    pub is_removed: bool,
    pub updated_date: Timestamp,
    pub version: i64,
}
