use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::{
        handball_match::{ClockStateResponse, CreateMatchRequest, MatchFilter, UpdateMatchRequest},
        statistics::MatchStatisticsResponse,
    },
    models::Match,
    repository::{game_event::GameEventRepository, handball_match::MatchRepository},
    services::{match_clock::ClockAction, statistics},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn search_matches(pool: &PgPool, filter: &MatchFilter) -> WebResult<(Vec<Match>, i64)> {
    Ok(MatchRepository::new(pool).search(filter).await?)
}

pub async fn get_match(pool: &PgPool, id: Uuid) -> WebResult<Match> {
    Ok(MatchRepository::new(pool).find_by_id(id).await?)
}

pub async fn create_match(pool: &PgPool, request: &CreateMatchRequest) -> WebResult<Match> {
    request
        .validate_teams()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let game = MatchRepository::new(pool).create(request).await?;
    tracing::info!(
        match_id = %game.match_id,
        home_team_id = %game.home_team_id,
        away_team_id = %game.away_team_id,
        "Match scheduled"
    );
    Ok(game)
}

pub async fn update_match(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateMatchRequest,
) -> WebResult<Match> {
    let repo = MatchRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    request
        .validate_teams(&existing)
        .and_then(|()| request.validate_markers(&existing))
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(repo.update(&existing, request).await?)
}

pub async fn delete_match(pool: &PgPool, id: Uuid) -> WebResult<()> {
    MatchRepository::new(pool).delete(id).await?;
    tracing::info!(match_id = %id, "Match deleted");
    Ok(())
}

pub async fn clock_state(pool: &PgPool, id: Uuid) -> WebResult<ClockStateResponse> {
    let game = MatchRepository::new(pool).find_by_id(id).await?;
    Ok(ClockStateResponse::at(&game, Utc::now()))
}

/// Stamps the marker for `action` with the server time and moves the match
/// status along with it.
pub async fn apply_clock_action(
    pool: &PgPool,
    id: Uuid,
    action: ClockAction,
) -> WebResult<ClockStateResponse> {
    let now = Utc::now();
    let updated = MatchRepository::new(pool)
        .record_clock_action(id, action, now)
        .await?;

    tracing::info!(match_id = %id, action = ?action, status = %updated.status, "Clock updated");

    Ok(ClockStateResponse::at(&updated, now))
}

pub async fn match_statistics(pool: &PgPool, id: Uuid) -> WebResult<MatchStatisticsResponse> {
    let game = MatchRepository::new(pool).find_by_id(id).await?;
    let events = GameEventRepository::new(pool).list_for_match(id).await?;

    Ok(statistics::match_statistics(&game, &events))
}
