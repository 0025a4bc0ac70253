use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_player, delete_player, get_player, get_player_statistics, get_player_teams,
    list_duplicate_players, list_players, update_player,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route("/duplicates", get(list_duplicate_players))
        .route("/:id", get(get_player).put(update_player).delete(delete_player))
        .route("/:id/teams", get(get_player_teams))
        .route("/:id/statistics", get(get_player_statistics))
}
