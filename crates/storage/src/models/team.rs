use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub name: String,
    pub category: String,
    pub club_id: Uuid,
    pub season_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}
