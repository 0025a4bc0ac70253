use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::game_event::{CreateGameEventRequest, GameEventResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/game-events/match/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Events of the match in match-time order", body = Vec<GameEventResponse>),
        (status = 404, description = "Match not found")
    ),
    tag = "game-events"
)]
pub async fn list_match_events(
    State(db): State<Database>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let events = services::list_for_match(db.pool(), match_id).await?;

    let response: Vec<GameEventResponse> =
        events.into_iter().map(GameEventResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/game-events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = GameEventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "game-events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let event = services::get_event(db.pool(), id).await?;

    Ok(Json(GameEventResponse::from(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/game-events",
    request_body = CreateGameEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = GameEventResponse),
        (status = 400, description = "Invalid event or team not in the match"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Unknown player")
    ),
    tag = "game-events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(req): Json<CreateGameEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::record_event(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(GameEventResponse::from(event))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/game-events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 204, description = "Event deleted; a deleted goal is taken off the score"),
        (status = 404, description = "Event not found")
    ),
    tag = "game-events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_event(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
