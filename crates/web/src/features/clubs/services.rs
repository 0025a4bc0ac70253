use sqlx::PgPool;
use storage::{
    dto::club::{CreateClubRequest, UpdateClubRequest},
    error::Result,
    models::Club,
    repository::club::ClubRepository,
};
use uuid::Uuid;

pub async fn list_clubs(pool: &PgPool) -> Result<Vec<Club>> {
    ClubRepository::new(pool).list().await
}

pub async fn get_club(pool: &PgPool, id: Uuid) -> Result<Club> {
    ClubRepository::new(pool).find_by_id(id).await
}

pub async fn create_club(pool: &PgPool, request: &CreateClubRequest) -> Result<Club> {
    let club = ClubRepository::new(pool).create(request).await?;
    tracing::info!(club_id = %club.club_id, name = %club.name, "Club created");
    Ok(club)
}

pub async fn update_club(pool: &PgPool, id: Uuid, request: &UpdateClubRequest) -> Result<Club> {
    let repo = ClubRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_club(pool: &PgPool, id: Uuid) -> Result<()> {
    ClubRepository::new(pool).delete(id).await?;
    tracing::info!(club_id = %id, "Club deleted");
    Ok(())
}
