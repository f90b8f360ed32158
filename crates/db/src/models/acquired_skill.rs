//! Acquired-skill entity model.

use grow_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One participant's skills-acquired record, created when the owning
/// project closes. Keyed by `(project_id, user_id)`; the upsert is
/// idempotent, so re-running a close retry cannot duplicate records.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiredSkill {
    pub project_id: EntityId,
    pub user_id: EntityId,
    /// Participant display name, resolved from the stored roster mapping.
    pub created_by_name: String,
    /// Semicolon-joined skill tags, at most three.
    pub acquired_skills: String,
    pub feedback: String,
    pub project_owner_name: String,
    pub project_title: String,
    pub project_closed_date: Timestamp,
    pub created_date: Timestamp,
}
