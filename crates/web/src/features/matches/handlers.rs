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
        handball_match::{
            ClockActionRequest, ClockStateResponse, CreateMatchRequest, MatchFilter,
            MatchResponse, UpdateMatchRequest,
        },
        statistics::MatchStatisticsResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    params(MatchFilter),
    responses(
        (status = 200, description = "Matches matching the filter, most recent first", body = PaginatedResponse<MatchResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    let pagination = filter.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let (matches, total_items) = services::search_matches(db.pool(), &filter).await?;

    let data: Vec<MatchResponse> = matches.into_iter().map(MatchResponse::from).collect();
    let response = PaginatedResponse::new(data, pagination, total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::get_match(db.pool(), id).await?;

    Ok(Json(MatchResponse::from(game)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match scheduled", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Unknown team")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(db): State<Database>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::create_match(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(game))).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::update_match(db.pool(), id, &req).await?;

    Ok(Json(MatchResponse::from(game)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 204, description = "Match and its events deleted"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_match(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}/clock",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Current clock reading", body = ClockStateResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_clock(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let clock = services::clock_state(db.pool(), id).await?;

    Ok(Json(clock).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{id}/clock",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    request_body = ClockActionRequest,
    responses(
        (status = 200, description = "Clock reading after the action", body = ClockStateResponse),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Action out of order")
    ),
    tag = "matches"
)]
pub async fn apply_clock_action(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClockActionRequest>,
) -> Result<Response, WebError> {
    let clock = services::apply_clock_action(db.pool(), id, req.action).await?;

    Ok(Json(clock).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}/statistics",
    params(
        ("id" = Uuid, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Team and player statistics for the match", body = MatchStatisticsResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match_statistics(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::match_statistics(db.pool(), id).await?;

    Ok(Json(stats).into_response())
}
