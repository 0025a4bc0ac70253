use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::club::{CreateClubRequest, UpdateClubRequest};
use crate::error::{Result, StorageError};
use crate::models::Club;

const CLUB_COLUMNS: &str = "club_id, name, logo_url, created_at";

pub struct ClubRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClubRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all clubs
    pub async fn list(&self) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(clubs)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Club> {
        sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE club_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateClubRequest) -> Result<Club> {
        sqlx::query_as::<_, Club>(&format!(
            "INSERT INTO clubs (name, logo_url) VALUES ($1, $2) RETURNING {CLUB_COLUMNS}"
        ))
        .bind(req.name.trim())
        .bind(&req.logo_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Club"))
    }

    pub async fn update(&self, existing: &Club, req: &UpdateClubRequest) -> Result<Club> {
        let name = req.name.as_deref().map_or(existing.name.as_str(), str::trim);
        let logo_url = req.logo_url.as_ref().or(existing.logo_url.as_ref());

        sqlx::query_as::<_, Club>(&format!(
            r#"
            UPDATE clubs
            SET name = $2, logo_url = $3
            WHERE club_id = $1
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(existing.club_id)
        .bind(name)
        .bind(logo_url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Club"))?
        .ok_or(StorageError::NotFound)
    }

    /// Deleting a club removes its teams, their matches and events.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
