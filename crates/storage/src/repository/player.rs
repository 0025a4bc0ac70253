use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::player::{
    CreatePlayerRequest, PlayerFilter, PlayerTeamHistoryEntry, UpdatePlayerRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Player;

const PLAYER_COLUMNS: &str = "p.player_id, p.name, p.number, p.handedness, p.is_goalkeeper, p.created_at";

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of players matching `filter`, with the total match count.
    pub async fn search(&self, filter: &PlayerFilter) -> Result<(Vec<Player>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM players p WHERE 1=1");
        push_filter(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {PLAYER_COLUMNS} FROM players p WHERE 1=1"));
        push_filter(&mut query, filter);
        query.push(" ORDER BY p.name, p.number LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let players = query
            .build_query_as::<Player>()
            .fetch_all(self.pool)
            .await?;

        Ok((players, total_items))
    }

    /// Every player, for duplicate detection.
    pub async fn list_all(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players p ORDER BY p.name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players p WHERE p.player_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Creates the player and, when `team_id` is set, opens their roster
    /// membership in the same transaction.
    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let mut tx = self.pool.begin().await?;

        let player = sqlx::query_as::<_, Player>(&format!(
            r#"
            INSERT INTO players AS p (name, number, handedness, is_goalkeeper)
            VALUES ($1, $2, $3, $4)
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(req.name.trim())
        .bind(req.number)
        .bind(req.handedness.to_string())
        .bind(req.is_goalkeeper)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(team_id) = req.team_id {
            sqlx::query("INSERT INTO player_teams (player_id, team_id) VALUES ($1, $2)")
                .bind(player.player_id)
                .bind(team_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::from(e).with_constraint_context("Roster entry"))?;
        }

        tx.commit().await?;
        Ok(player)
    }

    pub async fn update(&self, existing: &Player, req: &UpdatePlayerRequest) -> Result<Player> {
        let name = req.name.as_deref().map_or(existing.name.as_str(), str::trim);
        let number = req.number.unwrap_or(existing.number);
        let handedness = req
            .handedness
            .map_or_else(|| existing.handedness.clone(), |h| h.to_string());
        let is_goalkeeper = req.is_goalkeeper.unwrap_or(existing.is_goalkeeper);

        sqlx::query_as::<_, Player>(&format!(
            r#"
            UPDATE players AS p
            SET name = $2, number = $3, handedness = $4, is_goalkeeper = $5
            WHERE p.player_id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(existing.player_id)
        .bind(name)
        .bind(number)
        .bind(handedness)
        .bind(is_goalkeeper)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Every team the player has been on, current stints first.
    pub async fn team_history(&self, player_id: Uuid) -> Result<Vec<PlayerTeamHistoryEntry>> {
        let history = sqlx::query_as::<_, PlayerTeamHistoryEntry>(
            r#"
            SELECT
                t.team_id,
                t.name AS team_name,
                t.category,
                c.name AS club_name,
                s.name AS season_name,
                pt.joined_at,
                pt.left_at
            FROM player_teams pt
            JOIN teams t ON pt.team_id = t.team_id
            JOIN clubs c ON t.club_id = c.club_id
            JOIN seasons s ON t.season_id = s.season_id
            WHERE pt.player_id = $1
            ORDER BY pt.left_at DESC NULLS FIRST, pt.joined_at DESC
            "#,
        )
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(history)
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &PlayerFilter) {
    if let Some(pattern) = filter.search_pattern() {
        query.push(" AND p.name ILIKE ");
        query.push_bind(pattern);
    }

    if let Some(is_goalkeeper) = filter.is_goalkeeper {
        query.push(" AND p.is_goalkeeper = ");
        query.push_bind(is_goalkeeper);
    }

    if let Some(team_id) = filter.team_id {
        query.push(
            " AND EXISTS (SELECT 1 FROM player_teams pt WHERE pt.player_id = p.player_id AND pt.left_at IS NULL AND pt.team_id = ",
        );
        query.push_bind(team_id);
        query.push(")");
    }
}
