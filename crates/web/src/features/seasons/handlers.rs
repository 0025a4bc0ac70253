use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::season::{CreateSeasonRequest, SeasonResponse, UpdateSeasonRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/seasons",
    responses(
        (status = 200, description = "All seasons, most recent first", body = Vec<SeasonResponse>)
    ),
    tag = "seasons"
)]
pub async fn list_seasons(State(db): State<Database>) -> Result<Response, WebError> {
    let seasons = services::list_seasons(db.pool()).await?;

    let response: Vec<SeasonResponse> = seasons.into_iter().map(SeasonResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/seasons/{id}",
    params(
        ("id" = Uuid, Path, description = "Season id")
    ),
    responses(
        (status = 200, description = "Season found", body = SeasonResponse),
        (status = 404, description = "Season not found")
    ),
    tag = "seasons"
)]
pub async fn get_season(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let season = services::get_season(db.pool(), id).await?;

    Ok(Json(SeasonResponse::from(season)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/seasons",
    request_body = CreateSeasonRequest,
    responses(
        (status = 201, description = "Season created successfully", body = SeasonResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "seasons"
)]
pub async fn create_season(
    State(db): State<Database>,
    Json(req): Json<CreateSeasonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    req.validate_dates()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let season = services::create_season(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(SeasonResponse::from(season))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/seasons/{id}",
    params(
        ("id" = Uuid, Path, description = "Season id")
    ),
    request_body = UpdateSeasonRequest,
    responses(
        (status = 200, description = "Season updated successfully", body = SeasonResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Season not found")
    ),
    tag = "seasons"
)]
pub async fn update_season(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSeasonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let season = services::update_season(db.pool(), id, &req).await?;

    Ok(Json(SeasonResponse::from(season)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/seasons/{id}",
    params(
        ("id" = Uuid, Path, description = "Season id")
    ),
    responses(
        (status = 204, description = "Season deleted successfully"),
        (status = 404, description = "Season not found")
    ),
    tag = "seasons"
)]
pub async fn delete_season(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_season(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
