//! Repository for the `projects` table.

use async_trait::async_trait;

use crate::models::project::Project;
use crate::store::{ProjectStore, StoreError};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "project_id, created_by_user_id, created_by_name, title, description, \
     required_skills, support_documents, team_size, status, \
     project_participants_user_ids, project_participants_user_mapping, \
     project_start_date, project_end_date, project_closed_date, is_removed, \
     updated_date, version";

/// Postgres-backed [`ProjectStore`].
pub struct ProjectRepo {
    pool: DbPool,
}

impl ProjectRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepo {
    async fn get(
        &self,
        created_by_user_id: &str,
        project_id: &str,
    ) -> Result<Option<Project>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE created_by_user_id = $1 AND project_id = $2"
        );
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(created_by_user_id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, project: &Project) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO projects ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"
        );
        sqlx::query(&query)
            .bind(&project.project_id)
            .bind(&project.created_by_user_id)
            .bind(&project.created_by_name)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.required_skills)
            .bind(&project.support_documents)
            .bind(project.team_size)
            .bind(project.status)
            .bind(&project.project_participants_user_ids)
            .bind(&project.project_participants_user_mapping)
            .bind(project.project_start_date)
            .bind(project.project_end_date)
            .bind(project.project_closed_date)
            .bind(project.is_removed)
            .bind(project.updated_date)
            .bind(project.version)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<bool, StoreError> {
        // Version guard: only applies if no other writer has bumped the row
        // since this caller read it.
        let result = sqlx::query(
            "UPDATE projects SET
                created_by_name = $3,
                title = $4,
                description = $5,
                required_skills = $6,
                support_documents = $7,
                team_size = $8,
                status = $9,
                project_participants_user_ids = $10,
                project_participants_user_mapping = $11,
                project_start_date = $12,
                project_end_date = $13,
                project_closed_date = $14,
                is_removed = $15,
                updated_date = $16,
                version = version + 1
             WHERE created_by_user_id = $1 AND project_id = $2 AND version = $17",
        )
        .bind(&project.created_by_user_id)
        .bind(&project.project_id)
        .bind(&project.created_by_name)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.required_skills)
        .bind(&project.support_documents)
        .bind(project.team_size)
        .bind(project.status)
        .bind(&project.project_participants_user_ids)
        .bind(&project.project_participants_user_mapping)
        .bind(project.project_start_date)
        .bind(project.project_end_date)
        .bind(project.project_closed_date)
        .bind(project.is_removed)
        .bind(project.updated_date)
        .bind(project.version)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
