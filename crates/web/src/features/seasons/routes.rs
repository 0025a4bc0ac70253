use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_season, delete_season, get_season, list_seasons, update_season};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_seasons).post(create_season))
        .route("/:id", get(get_season).put(update_season).delete(delete_season))
}
