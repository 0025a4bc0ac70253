use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::handball_match::{CreateMatchRequest, MatchFilter, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{Match, MatchStatus};
use crate::services::match_clock::ClockAction;

const MATCH_COLUMNS: &str = r#"
    m.match_id, m.date, m.home_team_id, m.away_team_id, m.home_score, m.away_score, m.status,
    m.real_time_first_half_start, m.real_time_first_half_end,
    m.real_time_second_half_start, m.real_time_second_half_end,
    m.video_url, m.first_half_video_start, m.second_half_video_start, m.created_at
"#;

pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of matches matching `filter`, most recent first, with the
    /// total match count.
    pub async fn search(&self, filter: &MatchFilter) -> Result<(Vec<Match>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM matches m WHERE 1=1");
        push_filter(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {MATCH_COLUMNS} FROM matches m WHERE 1=1"));
        push_filter(&mut query, filter);
        query.push(" ORDER BY m.date DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let matches = query.build_query_as::<Match>().fetch_all(self.pool).await?;

        Ok((matches, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Match> {
        sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches m WHERE m.match_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateMatchRequest) -> Result<Match> {
        sqlx::query_as::<_, Match>(&format!(
            r#"
            INSERT INTO matches AS m (date, home_team_id, away_team_id, home_score, away_score,
                                      status, video_url, first_half_video_start, second_half_video_start)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(req.date)
        .bind(req.home_team_id)
        .bind(req.away_team_id)
        .bind(req.home_score)
        .bind(req.away_score)
        .bind(req.status.to_string())
        .bind(&req.video_url)
        .bind(req.first_half_video_start)
        .bind(req.second_half_video_start)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Match"))
    }

    /// Applies the fields present in `req`; absent fields keep whatever the
    /// row holds at write time.
    pub async fn update(&self, existing: &Match, req: &UpdateMatchRequest) -> Result<Match> {
        sqlx::query_as::<_, Match>(&format!(
            r#"
            UPDATE matches AS m
            SET date = COALESCE($2, m.date),
                home_team_id = COALESCE($3, m.home_team_id),
                away_team_id = COALESCE($4, m.away_team_id),
                home_score = COALESCE($5, m.home_score),
                away_score = COALESCE($6, m.away_score),
                status = COALESCE($7, m.status),
                real_time_first_half_start = COALESCE($8, m.real_time_first_half_start),
                real_time_first_half_end = COALESCE($9, m.real_time_first_half_end),
                real_time_second_half_start = COALESCE($10, m.real_time_second_half_start),
                real_time_second_half_end = COALESCE($11, m.real_time_second_half_end),
                video_url = COALESCE($12, m.video_url),
                first_half_video_start = COALESCE($13, m.first_half_video_start),
                second_half_video_start = COALESCE($14, m.second_half_video_start)
            WHERE m.match_id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(existing.match_id)
        .bind(req.date)
        .bind(req.home_team_id)
        .bind(req.away_team_id)
        .bind(req.home_score)
        .bind(req.away_score)
        .bind(req.status.map(|s| s.to_string()))
        .bind(req.real_time_first_half_start)
        .bind(req.real_time_first_half_end)
        .bind(req.real_time_second_half_start)
        .bind(req.real_time_second_half_end)
        .bind(&req.video_url)
        .bind(req.first_half_video_start)
        .bind(req.second_half_video_start)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Match"))?
        .ok_or(StorageError::NotFound)
    }

    /// Records a clock action against the locked match row and moves the
    /// status along with it.
    ///
    /// The row stays locked until commit, so concurrent actions on the same
    /// match see each other's markers and cannot overwrite them.
    pub async fn record_clock_action(
        &self,
        match_id: Uuid,
        action: ClockAction,
        now: DateTime<Utc>,
    ) -> Result<Match> {
        let mut tx = self.pool.begin().await?;

        let game = sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches m WHERE m.match_id = $1 FOR UPDATE"
        ))
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let mut clock = game.live_clock();
        clock.apply(action, now)?;

        let current = game.status.parse::<MatchStatus>().unwrap_or_default();
        let status = action.next_status(current);

        let updated = sqlx::query_as::<_, Match>(&format!(
            r#"
            UPDATE matches AS m
            SET real_time_first_half_start = $2,
                real_time_first_half_end = $3,
                real_time_second_half_start = $4,
                real_time_second_half_end = $5,
                status = $6
            WHERE m.match_id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(match_id)
        .bind(clock.first_half_start)
        .bind(clock.first_half_end)
        .bind(clock.second_half_start)
        .bind(clock.second_half_end)
        .bind(status.to_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM matches WHERE match_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &MatchFilter) {
    if let Some(team_id) = filter.team_id {
        query.push(" AND (m.home_team_id = ");
        query.push_bind(team_id);
        query.push(" OR m.away_team_id = ");
        query.push_bind(team_id);
        query.push(")");
    }

    if let Some(status) = filter.status {
        query.push(" AND m.status = ");
        query.push_bind(status.to_string());
    }

    if let Some(season_id) = filter.season_id {
        query.push(" AND EXISTS (SELECT 1 FROM teams t WHERE t.team_id = m.home_team_id AND t.season_id = ");
        query.push_bind(season_id);
        query.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::seed_match;
    use chrono::Duration;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_clock_action_records_marker_and_status(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = MatchRepository::new(&pool);
        let now = Utc::now();

        let started = repo
            .record_clock_action(game.match_id, ClockAction::StartFirstHalf, now)
            .await
            .unwrap();

        assert!(started.real_time_first_half_start.is_some());
        assert_eq!(started.status, MatchStatus::InProgress.to_string());

        let again = repo
            .record_clock_action(
                game.match_id,
                ClockAction::StartFirstHalf,
                now + Duration::seconds(5),
            )
            .await;
        assert!(matches!(again, Err(StorageError::InvalidState(_))));

        let stored = repo.find_by_id(game.match_id).await.unwrap();
        assert_eq!(
            stored.real_time_first_half_start,
            started.real_time_first_half_start
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_kick_offs_record_one_marker(pool: PgPool) {
        let game = seed_match(&pool).await;
        let now = Utc::now();

        let first_pool = pool.clone();
        let second_pool = pool.clone();
        let (first, second) = tokio::join!(
            async move {
                MatchRepository::new(&first_pool)
                    .record_clock_action(game.match_id, ClockAction::StartFirstHalf, now)
                    .await
            },
            async move {
                MatchRepository::new(&second_pool)
                    .record_clock_action(
                        game.match_id,
                        ClockAction::StartFirstHalf,
                        now + Duration::seconds(1),
                    )
                    .await
            },
        );

        let winners: Vec<Match> = [first, second].into_iter().filter_map(|r| r.ok()).collect();
        assert_eq!(winners.len(), 1);

        let stored = MatchRepository::new(&pool)
            .find_by_id(game.match_id)
            .await
            .unwrap();
        assert_eq!(
            stored.real_time_first_half_start,
            winners[0].real_time_first_half_start
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_patch_keeps_markers_it_does_not_send(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = MatchRepository::new(&pool);

        let stale = repo.find_by_id(game.match_id).await.unwrap();
        let started = repo
            .record_clock_action(game.match_id, ClockAction::StartFirstHalf, Utc::now())
            .await
            .unwrap();

        let patch = UpdateMatchRequest {
            home_score: Some(3),
            ..Default::default()
        };
        let updated = repo.update(&stale, &patch).await.unwrap();

        assert_eq!(updated.home_score, 3);
        assert_eq!(updated.status, MatchStatus::InProgress.to_string());
        assert_eq!(
            updated.real_time_first_half_start,
            started.real_time_first_half_start
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_clock_action_on_missing_match(pool: PgPool) {
        let result = MatchRepository::new(&pool)
            .record_clock_action(Uuid::new_v4(), ClockAction::StartFirstHalf, Utc::now())
            .await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
