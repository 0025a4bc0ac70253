use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        player::{
            CreatePlayerRequest, DuplicatePlayerPair, DuplicateQuery, PlayerFilter,
            PlayerResponse, PlayerTeamHistoryEntry, UpdatePlayerRequest,
        },
        statistics::PlayerStatistics,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players",
    params(PlayerFilter),
    responses(
        (status = 200, description = "Players matching the filter", body = PaginatedResponse<PlayerResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
    Query(filter): Query<PlayerFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (players, total_items) = services::search_players(db.pool(), &filter).await?;

    let data: Vec<PlayerResponse> = players.into_iter().map(PlayerResponse::from).collect();
    let response = PaginatedResponse::new(data, filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/duplicates",
    params(DuplicateQuery),
    responses(
        (status = 200, description = "Likely duplicate players, most similar first", body = Vec<DuplicatePlayerPair>),
        (status = 400, description = "Invalid threshold")
    ),
    tag = "players"
)]
pub async fn list_duplicate_players(
    State(db): State<Database>,
    Query(query): Query<DuplicateQuery>,
) -> Result<Response, WebError> {
    let threshold = query.threshold().map_err(WebError::BadRequest)?;

    let pairs = services::find_duplicates(db.pool(), threshold).await?;

    Ok(Json(pairs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let player = services::get_player(db.pool(), id).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}/teams",
    params(
        ("id" = Uuid, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Teams the player has been on", body = Vec<PlayerTeamHistoryEntry>),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player_teams(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let history = services::team_history(db.pool(), id).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}/statistics",
    params(
        ("id" = Uuid, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Totals over every recorded match", body = PlayerStatistics),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player_statistics(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::player_statistics(db.pool(), id).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player created successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Referenced team does not exist")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player id")
    ),
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::update_player(db.pool(), id, &req).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player id")
    ),
    responses(
        (status = 204, description = "Player deleted successfully"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_player(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
