use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub name: String,
    pub number: i16,
    pub handedness: String,
    pub is_goalkeeper: bool,
    pub created_at: chrono::NaiveDateTime,
}
