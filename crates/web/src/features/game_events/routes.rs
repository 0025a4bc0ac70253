use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_event, delete_event, get_event, list_match_events};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_event))
        .route("/match/:match_id", get(list_match_events))
        .route("/:id", get(get_event).delete(delete_event))
}
