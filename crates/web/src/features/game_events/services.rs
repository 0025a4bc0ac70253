use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::game_event::CreateGameEventRequest,
    models::GameEvent,
    repository::{
        game_event::{GameEventRepository, NewGameEvent},
        handball_match::MatchRepository,
        team::TeamRepository,
    },
    services::match_clock::resolve_event_timestamps,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_for_match(pool: &PgPool, match_id: Uuid) -> WebResult<Vec<GameEvent>> {
    MatchRepository::new(pool).find_by_id(match_id).await?;
    Ok(GameEventRepository::new(pool).list_for_match(match_id).await?)
}

pub async fn get_event(pool: &PgPool, id: Uuid) -> WebResult<GameEvent> {
    Ok(GameEventRepository::new(pool).find_by_id(id).await?)
}

/// Records an event against a match, stamping it from the match clock when
/// the request carries no explicit timestamp.
pub async fn record_event(pool: &PgPool, request: &CreateGameEventRequest) -> WebResult<GameEvent> {
    let kind = request.event_kind().map_err(WebError::BadRequest)?;

    let game = MatchRepository::new(pool)
        .find_by_id(request.match_id)
        .await?;

    if game.side_of(request.team_id).is_none() {
        return Err(WebError::BadRequest(
            "Team does not play in this match".to_string(),
        ));
    }

    if let Some(player_id) = request.player_id
        && !TeamRepository::new(pool)
            .has_player(request.team_id, player_id)
            .await?
    {
        return Err(WebError::BadRequest(
            "Player is not on the roster of this team".to_string(),
        ));
    }

    let stamps = resolve_event_timestamps(
        &game.live_clock(),
        &game.video_clock(),
        request.timestamp,
        request.video_time,
        Utc::now(),
    )?;

    let new_event = NewGameEvent {
        match_id: game.match_id,
        team_id: request.team_id,
        player_id: request.player_id,
        kind,
        position: request.position,
        distance: request.distance,
        goal_zone: request.goal_zone,
        timestamp: stamps.timestamp,
        video_timestamp: stamps.video_timestamp,
    };

    let event = GameEventRepository::new(pool).create(&new_event).await?;

    tracing::info!(
        event_id = %event.event_id,
        match_id = %event.match_id,
        event_type = %event.event_type,
        subtype = %event.subtype,
        timestamp = event.timestamp,
        "Game event recorded"
    );

    Ok(event)
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> WebResult<()> {
    let deleted = GameEventRepository::new(pool).delete(id).await?;

    tracing::info!(
        event_id = %deleted.event_id,
        match_id = %deleted.match_id,
        goal = deleted.is_goal(),
        "Game event deleted"
    );

    Ok(())
}
