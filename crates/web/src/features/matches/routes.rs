use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    apply_clock_action, create_match, delete_match, get_clock, get_match, get_match_statistics,
    list_matches, update_match,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route(
            "/:id",
            get(get_match).patch(update_match).delete(delete_match),
        )
        .route("/:id/clock", get(get_clock).post(apply_clock_action))
        .route("/:id/statistics", get(get_match_statistics))
}
