use sqlx::PgPool;
use storage::{
    dto::{
        player::{
            CreatePlayerRequest, DuplicatePlayerPair, PlayerFilter, PlayerTeamHistoryEntry,
            UpdatePlayerRequest,
        },
        statistics::PlayerStatistics,
    },
    error::Result,
    models::Player,
    repository::{game_event::GameEventRepository, player::PlayerRepository},
    services::{duplicates, statistics},
};
use uuid::Uuid;

/// Search players with filtering and pagination
pub async fn search_players(pool: &PgPool, filter: &PlayerFilter) -> Result<(Vec<Player>, i64)> {
    PlayerRepository::new(pool).search(filter).await
}

pub async fn get_player(pool: &PgPool, id: Uuid) -> Result<Player> {
    PlayerRepository::new(pool).find_by_id(id).await
}

pub async fn create_player(pool: &PgPool, request: &CreatePlayerRequest) -> Result<Player> {
    let player = PlayerRepository::new(pool).create(request).await?;
    tracing::info!(
        player_id = %player.player_id,
        team_id = ?request.team_id,
        "Player created"
    );
    Ok(player)
}

pub async fn update_player(
    pool: &PgPool,
    id: Uuid,
    request: &UpdatePlayerRequest,
) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_player(pool: &PgPool, id: Uuid) -> Result<()> {
    PlayerRepository::new(pool).delete(id).await
}

pub async fn team_history(pool: &PgPool, id: Uuid) -> Result<Vec<PlayerTeamHistoryEntry>> {
    let repo = PlayerRepository::new(pool);
    repo.find_by_id(id).await?;
    repo.team_history(id).await
}

/// Pairs of players whose names look like the same person
pub async fn find_duplicates(pool: &PgPool, threshold: f64) -> Result<Vec<DuplicatePlayerPair>> {
    let players = PlayerRepository::new(pool).list_all().await?;
    let pairs = duplicates::find_duplicate_pairs(&players, threshold);
    tracing::debug!(
        players = players.len(),
        pairs = pairs.len(),
        threshold,
        "Duplicate scan finished"
    );
    Ok(pairs)
}

/// Career totals over every recorded event
pub async fn player_statistics(pool: &PgPool, id: Uuid) -> Result<PlayerStatistics> {
    let player = PlayerRepository::new(pool).find_by_id(id).await?;
    let events = GameEventRepository::new(pool)
        .list_for_player(player.player_id)
        .await?;
    Ok(statistics::player_statistics(player.player_id, &events))
}
