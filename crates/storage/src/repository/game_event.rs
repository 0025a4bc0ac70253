use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{EventKind, GameEvent, GoalZone, ShotDistance, ShotPosition};

const EVENT_COLUMNS: &str = r#"
    event_id, match_id, team_id, player_id, event_type, subtype, position, distance,
    goal_zone, sanction_type, timestamp, video_timestamp, created_at
"#;

/// A validated event ready to be stored.
#[derive(Debug, Clone)]
pub struct NewGameEvent {
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Option<Uuid>,
    pub kind: EventKind,
    pub position: Option<ShotPosition>,
    pub distance: Option<ShotDistance>,
    pub goal_zone: Option<GoalZone>,
    pub timestamp: i32,
    pub video_timestamp: Option<i32>,
}

pub struct GameEventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GameEventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Events of a match in match-time order
    pub async fn list_for_match(&self, match_id: Uuid) -> Result<Vec<GameEvent>> {
        let events = sqlx::query_as::<_, GameEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM game_events WHERE match_id = $1 ORDER BY timestamp, created_at"
        ))
        .bind(match_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn list_for_player(&self, player_id: Uuid) -> Result<Vec<GameEvent>> {
        let events = sqlx::query_as::<_, GameEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM game_events WHERE player_id = $1 ORDER BY match_id, timestamp"
        ))
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<GameEvent> {
        sqlx::query_as::<_, GameEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM game_events WHERE event_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Stores the event; a goal also bumps the scoring team's score in the
    /// same transaction.
    pub async fn create(&self, event: &NewGameEvent) -> Result<GameEvent> {
        let mut tx = self.pool.begin().await?;

        let stored = sqlx::query_as::<_, GameEvent>(&format!(
            r#"
            INSERT INTO game_events (match_id, team_id, player_id, event_type, subtype, position,
                                     distance, goal_zone, sanction_type, timestamp, video_timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.match_id)
        .bind(event.team_id)
        .bind(event.player_id)
        .bind(event.kind.event_type().to_string())
        .bind(event.kind.subtype())
        .bind(event.position.map(|p| p.to_string()))
        .bind(event.distance.map(|d| d.to_string()))
        .bind(event.goal_zone.map(|z| z.to_string()))
        .bind(event.kind.sanction().map(|s| s.to_string()))
        .bind(event.timestamp)
        .bind(event.video_timestamp)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Game event"))?;

        if event.kind.is_goal() {
            adjust_score(&mut tx, stored.match_id, stored.team_id, 1).await?;
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Removes the event and takes a deleted goal off the score.
    pub async fn delete(&self, id: Uuid) -> Result<GameEvent> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, GameEvent>(&format!(
            "DELETE FROM game_events WHERE event_id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if deleted.is_goal() {
            adjust_score(&mut tx, deleted.match_id, deleted.team_id, -1).await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}

/// Moves the score of whichever side `team_id` plays on by `delta`, never
/// below zero.
async fn adjust_score(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    match_id: Uuid,
    team_id: Uuid,
    delta: i32,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE matches
        SET home_score = CASE WHEN home_team_id = $2 THEN GREATEST(home_score + $3, 0) ELSE home_score END,
            away_score = CASE WHEN away_team_id = $2 THEN GREATEST(away_score + $3, 0) ELSE away_score END
        WHERE match_id = $1
        "#,
    )
    .bind(match_id)
    .bind(team_id)
    .bind(delta)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::handball_match::UpdateMatchRequest;
    use crate::models::{ShotOutcome, TurnoverKind};
    use crate::repository::fixtures::{SeededMatch, seed_match};
    use crate::repository::handball_match::MatchRepository;

    fn event(game: &SeededMatch, team_id: Uuid, kind: EventKind, timestamp: i32) -> NewGameEvent {
        NewGameEvent {
            match_id: game.match_id,
            team_id,
            player_id: None,
            kind,
            position: None,
            distance: None,
            goal_zone: None,
            timestamp,
            video_timestamp: None,
        }
    }

    async fn score(pool: &PgPool, match_id: Uuid) -> (i32, i32) {
        let game = MatchRepository::new(pool).find_by_id(match_id).await.unwrap();
        (game.home_score, game.away_score)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_goal_increments_scoring_side(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = GameEventRepository::new(&pool);

        repo.create(&event(&game, game.away_team_id, EventKind::Shot(ShotOutcome::Goal), 60))
            .await
            .unwrap();

        assert_eq!(score(&pool, game.match_id).await, (0, 1));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_goal_decrements_score(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = GameEventRepository::new(&pool);

        let goal = repo
            .create(&event(&game, game.home_team_id, EventKind::Shot(ShotOutcome::Goal), 60))
            .await
            .unwrap();
        assert_eq!(score(&pool, game.match_id).await, (1, 0));

        repo.delete(goal.event_id).await.unwrap();

        assert_eq!(score(&pool, game.match_id).await, (0, 0));
        assert!(repo.list_for_match(game.match_id).await.unwrap().is_empty());
        assert!(matches!(
            repo.find_by_id(goal.event_id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_goal_never_drops_score_below_zero(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = GameEventRepository::new(&pool);
        let matches = MatchRepository::new(&pool);

        let goal = repo
            .create(&event(&game, game.home_team_id, EventKind::Shot(ShotOutcome::Goal), 60))
            .await
            .unwrap();

        let existing = matches.find_by_id(game.match_id).await.unwrap();
        let reset = UpdateMatchRequest {
            home_score: Some(0),
            ..Default::default()
        };
        matches.update(&existing, &reset).await.unwrap();

        repo.delete(goal.event_id).await.unwrap();

        assert_eq!(score(&pool, game.match_id).await, (0, 0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_non_goal_keeps_score(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = GameEventRepository::new(&pool);

        repo.create(&event(&game, game.home_team_id, EventKind::Shot(ShotOutcome::Goal), 30))
            .await
            .unwrap();
        let turnover = repo
            .create(&event(
                &game,
                game.home_team_id,
                EventKind::Turnover(TurnoverKind::Steps),
                90,
            ))
            .await
            .unwrap();

        repo.delete(turnover.event_id).await.unwrap();

        assert_eq!(score(&pool, game.match_id).await, (1, 0));
        assert_eq!(repo.list_for_match(game.match_id).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_missing_event_is_not_found(pool: PgPool) {
        let repo = GameEventRepository::new(&pool);
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(StorageError::NotFound)
        ));
    }
}
