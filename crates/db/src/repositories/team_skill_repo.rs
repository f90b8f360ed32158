//! Repository for the `team_skills` table.

use async_trait::async_trait;

use crate::models::team_skill::TeamSkill;
use crate::store::{StoreError, TeamSkillStore};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "team_id, skills, created_by_user_id, updated_by_user_id, created_date, updated_date";

/// Postgres-backed [`TeamSkillStore`].
pub struct TeamSkillRepo {
    pool: DbPool,
}

impl TeamSkillRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamSkillStore for TeamSkillRepo {
    async fn get(&self, team_id: &str) -> Result<Option<TeamSkill>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM team_skills WHERE team_id = $1");
        let row = sqlx::query_as::<_, TeamSkill>(&query)
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upsert(&self, skill: &TeamSkill) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO team_skills ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (team_id) DO UPDATE SET
                skills = EXCLUDED.skills,
                updated_by_user_id = EXCLUDED.updated_by_user_id,
                updated_date = EXCLUDED.updated_date"
        );
        sqlx::query(&query)
            .bind(&skill.team_id)
            .bind(&skill.skills)
            .bind(&skill.created_by_user_id)
            .bind(&skill.updated_by_user_id)
            .bind(skill.created_date)
            .bind(skill.updated_date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
