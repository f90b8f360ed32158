//! In-memory store implementations.
//!
//! Back the API integration tests and the no-database dev profile. The
//! project store mirrors the Postgres compare-and-swap semantics under a
//! mutex: an update applies only when the caller's version matches the
//! stored one, and an applied update increments the stored version.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::acquired_skill::AcquiredSkill;
use crate::models::project::Project;
use crate::models::team_skill::TeamSkill;
use crate::store::{AcquiredSkillStore, ProjectStore, StoreError, TeamSkillStore};

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// In-memory [`ProjectStore`], keyed by `(created_by_user_id, project_id)`.
#[derive(Default)]
pub struct MemoryProjectStore {
    rows: Mutex<HashMap<(String, String), Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn get(
        &self,
        created_by_user_id: &str,
        project_id: &str,
    ) -> Result<Option<Project>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .get(&(created_by_user_id.to_string(), project_id.to_string()))
            .cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        rows.insert(
            (
                project.created_by_user_id.clone(),
                project.project_id.clone(),
            ),
            project.clone(),
        );
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().await;
        let key = (
            project.created_by_user_id.clone(),
            project.project_id.clone(),
        );
        match rows.get_mut(&key) {
            Some(existing) if existing.version == project.version => {
                let mut next = project.clone();
                next.version += 1;
                *existing = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Acquired skills
// ---------------------------------------------------------------------------

/// In-memory [`AcquiredSkillStore`], keyed by `(project_id, user_id)`.
#[derive(Default)]
pub struct MemoryAcquiredSkillStore {
    rows: Mutex<HashMap<(String, String), AcquiredSkill>>,
}

impl MemoryAcquiredSkillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AcquiredSkillStore for MemoryAcquiredSkillStore {
    async fn upsert(&self, record: &AcquiredSkill) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let key = (record.project_id.clone(), record.user_id.clone());
        let mut next = record.clone();
        if let Some(existing) = rows.get(&key) {
            // Matches the SQL upsert: creation date survives replacement.
            next.created_date = existing.created_date;
        }
        rows.insert(key, next);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AcquiredSkill>, StoreError> {
        let rows = self.rows.lock().await;
        let mut records: Vec<AcquiredSkill> = rows
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.project_closed_date.cmp(&a.project_closed_date));
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Team skills
// ---------------------------------------------------------------------------

/// In-memory [`TeamSkillStore`], keyed by `team_id`.
#[derive(Default)]
pub struct MemoryTeamSkillStore {
    rows: Mutex<HashMap<String, TeamSkill>>,
}

impl MemoryTeamSkillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamSkillStore for MemoryTeamSkillStore {
    async fn get(&self, team_id: &str) -> Result<Option<TeamSkill>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(team_id).cloned())
    }

    async fn upsert(&self, skill: &TeamSkill) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let mut next = skill.clone();
        if let Some(existing) = rows.get(&skill.team_id) {
            next.created_by_user_id = existing.created_by_user_id.clone();
            next.created_date = existing.created_date;
        }
        rows.insert(skill.team_id.clone(), next);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
