use axum::{
    Router,
    routing::{delete, get},
};
use storage::Database;

use super::handlers::{
    add_roster_player, create_team, delete_team, get_roster, get_team, list_teams,
    remove_roster_player, update_team,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id", get(get_team).put(update_team).delete(delete_team))
        .route("/:id/players", get(get_roster).post(add_roster_player))
        .route("/:id/players/:player_id", delete(remove_roster_player))
}
