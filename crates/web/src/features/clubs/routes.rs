use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_club, delete_club, get_club, list_clubs, update_club};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/:id", get(get_club).put(update_club).delete(delete_club))
}
