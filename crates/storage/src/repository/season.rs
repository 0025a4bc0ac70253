use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::season::{CreateSeasonRequest, UpdateSeasonRequest};
use crate::error::{Result, StorageError};
use crate::models::Season;

const SEASON_COLUMNS: &str = "season_id, name, start_date, end_date, created_at";

pub struct SeasonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent season first
    pub async fn list(&self) -> Result<Vec<Season>> {
        let seasons = sqlx::query_as::<_, Season>(&format!(
            "SELECT {SEASON_COLUMNS} FROM seasons ORDER BY start_date DESC, name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(seasons)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Season> {
        sqlx::query_as::<_, Season>(&format!(
            "SELECT {SEASON_COLUMNS} FROM seasons WHERE season_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateSeasonRequest) -> Result<Season> {
        sqlx::query_as::<_, Season>(&format!(
            r#"
            INSERT INTO seasons (name, start_date, end_date)
            VALUES ($1, $2, $3)
            RETURNING {SEASON_COLUMNS}
            "#
        ))
        .bind(req.name.trim())
        .bind(req.start_date)
        .bind(req.end_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Season"))
    }

    pub async fn update(&self, existing: &Season, req: &UpdateSeasonRequest) -> Result<Season> {
        let name = req.name.as_deref().map_or(existing.name.as_str(), str::trim);
        let start_date = req.start_date.unwrap_or(existing.start_date);
        let end_date = req.end_date.unwrap_or(existing.end_date);

        sqlx::query_as::<_, Season>(&format!(
            r#"
            UPDATE seasons
            SET name = $2, start_date = $3, end_date = $4
            WHERE season_id = $1
            RETURNING {SEASON_COLUMNS}
            "#
        ))
        .bind(existing.season_id)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Season"))?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM seasons WHERE season_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
