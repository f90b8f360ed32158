//! Repository for the `acquired_skills` table.

use async_trait::async_trait;

use crate::models::acquired_skill::AcquiredSkill;
use crate::store::{AcquiredSkillStore, StoreError};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "project_id, user_id, created_by_name, acquired_skills, feedback, \
     project_owner_name, project_title, project_closed_date, created_date";

/// Postgres-backed [`AcquiredSkillStore`].
pub struct AcquiredSkillRepo {
    pool: DbPool,
}

impl AcquiredSkillRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AcquiredSkillStore for AcquiredSkillRepo {
    async fn upsert(&self, record: &AcquiredSkill) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO acquired_skills ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (project_id, user_id) DO UPDATE SET
                created_by_name = EXCLUDED.created_by_name,
                acquired_skills = EXCLUDED.acquired_skills,
                feedback = EXCLUDED.feedback,
                project_owner_name = EXCLUDED.project_owner_name,
                project_title = EXCLUDED.project_title,
                project_closed_date = EXCLUDED.project_closed_date"
        );
        sqlx::query(&query)
            .bind(&record.project_id)
            .bind(&record.user_id)
            .bind(&record.created_by_name)
            .bind(&record.acquired_skills)
            .bind(&record.feedback)
            .bind(&record.project_owner_name)
            .bind(&record.project_title)
            .bind(record.project_closed_date)
            .bind(record.created_date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AcquiredSkill>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM acquired_skills
             WHERE user_id = $1
             ORDER BY project_closed_date DESC"
        );
        let rows = sqlx::query_as::<_, AcquiredSkill>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
