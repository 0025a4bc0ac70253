use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::team::{
        AddRosterPlayerRequest, CreateTeamRequest, RosterEntry, TeamDetailResponse, TeamFilter,
        TeamResponse, UpdateTeamRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    params(TeamFilter),
    responses(
        (status = 200, description = "Teams matching the filter", body = Vec<TeamResponse>)
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Query(filter): Query<TeamFilter>,
) -> Result<Response, WebError> {
    let teams = services::list_teams(db.pool(), &filter).await?;

    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Team with club, season and roster", body = TeamDetailResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = services::get_team_detailed(db.pool(), id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate team or unknown club/season")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::update_team(db.pool(), id, &req).await?;

    Ok(Json(TeamResponse::from(team)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 204, description = "Team deleted successfully"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_team(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/players",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Current roster", body = Vec<RosterEntry>),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_roster(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let roster = services::roster(db.pool(), id).await?;

    Ok(Json(roster).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/players",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = AddRosterPlayerRequest,
    responses(
        (status = 201, description = "Player added; returns the roster", body = Vec<RosterEntry>),
        (status = 404, description = "Team or player not found"),
        (status = 409, description = "Player is already on the roster")
    ),
    tag = "teams"
)]
pub async fn add_roster_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddRosterPlayerRequest>,
) -> Result<Response, WebError> {
    let roster = services::add_player(db.pool(), id, req.player_id).await?;

    Ok((StatusCode::CREATED, Json(roster)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}/players/{player_id}",
    params(
        ("id" = Uuid, Path, description = "Team id"),
        ("player_id" = Uuid, Path, description = "Player id")
    ),
    responses(
        (status = 204, description = "Player removed from the roster"),
        (status = 404, description = "Player is not on the roster")
    ),
    tag = "teams"
)]
pub async fn remove_roster_player(
    State(db): State<Database>,
    Path((id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    services::remove_player(db.pool(), id, player_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
