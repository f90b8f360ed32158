//! Store traits consumed by the workflow engine and handlers.
//!
//! The engine never talks to Postgres directly; it holds trait objects so
//! tests and the no-database dev profile can swap in the in-memory stores
//! from [`crate::memory`].

use async_trait::async_trait;

use crate::models::acquired_skill::AcquiredSkill;
use crate::models::project::Project;
use crate::models::team_skill::TeamSkill;

/// Failure surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Project records keyed by `(created_by_user_id, project_id)`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Fetch a project row, including soft-deleted ones. Callers decide how
    /// to treat `is_removed`.
    async fn get(
        &self,
        created_by_user_id: &str,
        project_id: &str,
    ) -> Result<Option<Project>, StoreError>;

    /// Insert a new project row.
    async fn insert(&self, project: &Project) -> Result<(), StoreError>;

    /// Compare-and-swap update. Applies only if the stored version still
    /// equals `project.version`, incrementing the stored version; returns
    /// whether the update was applied. A `false` result means another
    /// writer got there first and the caller should refetch and retry.
    async fn update(&self, project: &Project) -> Result<bool, StoreError>;

    /// Cheap reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Acquired-skill records keyed by `(project_id, user_id)`.
#[async_trait]
pub trait AcquiredSkillStore: Send + Sync {
    /// Insert or replace one participant's record.
    async fn upsert(&self, record: &AcquiredSkill) -> Result<(), StoreError>;

    /// All records for a user, most recent closure first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AcquiredSkill>, StoreError>;
}

/// Configured team skills keyed by `team_id`.
#[async_trait]
pub trait TeamSkillStore: Send + Sync {
    async fn get(&self, team_id: &str) -> Result<Option<TeamSkill>, StoreError>;

    /// Insert or update a team's configured skills. On update the original
    /// creator and creation date are preserved.
    async fn upsert(&self, skill: &TeamSkill) -> Result<(), StoreError>;
}
