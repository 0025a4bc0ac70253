use sqlx::PgPool;
use storage::{
    dto::season::{CreateSeasonRequest, UpdateSeasonRequest},
    models::Season,
    repository::season::SeasonRepository,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_seasons(pool: &PgPool) -> WebResult<Vec<Season>> {
    Ok(SeasonRepository::new(pool).list().await?)
}

pub async fn get_season(pool: &PgPool, id: Uuid) -> WebResult<Season> {
    Ok(SeasonRepository::new(pool).find_by_id(id).await?)
}

pub async fn create_season(pool: &PgPool, request: &CreateSeasonRequest) -> WebResult<Season> {
    Ok(SeasonRepository::new(pool).create(request).await?)
}

/// The date order is checked against the merged values, so moving only one
/// end of a season is validated too.
pub async fn update_season(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateSeasonRequest,
) -> WebResult<Season> {
    let repo = SeasonRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    request
        .validate_dates(&existing)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(repo.update(&existing, request).await?)
}

pub async fn delete_season(pool: &PgPool, id: Uuid) -> WebResult<()> {
    SeasonRepository::new(pool).delete(id).await?;
    tracing::info!(season_id = %id, "Season deleted");
    Ok(())
}
