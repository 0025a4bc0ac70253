use sqlx::PgPool;
use storage::{
    dto::team::{CreateTeamRequest, RosterEntry, TeamDetailResponse, TeamFilter, UpdateTeamRequest},
    error::Result,
    models::Team,
    repository::{player::PlayerRepository, team::TeamRepository},
};
use uuid::Uuid;

pub async fn list_teams(pool: &PgPool, filter: &TeamFilter) -> Result<Vec<Team>> {
    TeamRepository::new(pool).list(filter).await
}

pub async fn get_team_detailed(pool: &PgPool, id: Uuid) -> Result<TeamDetailResponse> {
    TeamRepository::new(pool).find_detailed(id).await
}

pub async fn create_team(pool: &PgPool, request: &CreateTeamRequest) -> Result<Team> {
    let team = TeamRepository::new(pool).create(request).await?;
    tracing::info!(team_id = %team.team_id, club_id = %team.club_id, "Team created");
    Ok(team)
}

pub async fn update_team(pool: &PgPool, id: Uuid, request: &UpdateTeamRequest) -> Result<Team> {
    let repo = TeamRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_team(pool: &PgPool, id: Uuid) -> Result<()> {
    TeamRepository::new(pool).delete(id).await
}

pub async fn roster(pool: &PgPool, team_id: Uuid) -> Result<Vec<RosterEntry>> {
    let repo = TeamRepository::new(pool);
    repo.find_by_id(team_id).await?;
    repo.roster(team_id).await
}

/// Both ends must exist, so a typo in either id reads as not found rather
/// than as a conflict.
pub async fn add_player(pool: &PgPool, team_id: Uuid, player_id: Uuid) -> Result<Vec<RosterEntry>> {
    let repo = TeamRepository::new(pool);
    repo.find_by_id(team_id).await?;
    PlayerRepository::new(pool).find_by_id(player_id).await?;

    repo.add_player(team_id, player_id).await?;
    tracing::info!(team_id = %team_id, player_id = %player_id, "Player joined roster");

    repo.roster(team_id).await
}

pub async fn remove_player(pool: &PgPool, team_id: Uuid, player_id: Uuid) -> Result<()> {
    TeamRepository::new(pool)
        .remove_player(team_id, player_id)
        .await?;
    tracing::info!(team_id = %team_id, player_id = %player_id, "Player left roster");
    Ok(())
}
