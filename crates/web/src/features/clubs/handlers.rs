use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::club::{ClubResponse, CreateClubRequest, UpdateClubRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs",
    responses(
        (status = 200, description = "List all clubs", body = Vec<ClubResponse>)
    ),
    tag = "clubs"
)]
pub async fn list_clubs(State(db): State<Database>) -> Result<Response, WebError> {
    let clubs = services::list_clubs(db.pool()).await?;

    let response: Vec<ClubResponse> = clubs.into_iter().map(ClubResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Club found", body = ClubResponse),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let club = services::get_club(db.pool(), id).await?;

    Ok(Json(ClubResponse::from(club)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    responses(
        (status = 201, description = "Club created successfully", body = ClubResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A club with this name already exists")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(db): State<Database>,
    Json(req): Json<CreateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ClubResponse::from(club))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    request_body = UpdateClubRequest,
    responses(
        (status = 200, description = "Club updated successfully", body = ClubResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::update_club(db.pool(), id, &req).await?;

    Ok(Json(ClubResponse::from(club)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/clubs/{id}",
    params(
        ("id" = Uuid, Path, description = "Club id")
    ),
    responses(
        (status = 204, description = "Club deleted successfully"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_club(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
