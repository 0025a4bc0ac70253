use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::event_kind::{EventKind, EventType, GoalZone, ShotPosition};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GameEvent {
    pub event_id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Option<Uuid>,
    pub event_type: String,
    pub subtype: String,
    pub position: Option<String>,
    pub distance: Option<String>,
    pub goal_zone: Option<String>,
    pub sanction_type: Option<String>,
    pub timestamp: i32,
    pub video_timestamp: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl GameEvent {
    /// Typed view of the stored type/subtype, `None` for rows written with an
    /// unknown vocabulary.
    pub fn kind(&self) -> Option<EventKind> {
        let event_type: EventType = self.event_type.parse().ok()?;
        EventKind::parse(event_type, &self.subtype).ok()
    }

    pub fn is_goal(&self) -> bool {
        self.kind().is_some_and(|kind| kind.is_goal())
    }

    pub fn shot_position(&self) -> Option<ShotPosition> {
        self.position.as_deref()?.parse().ok()
    }

    pub fn zone(&self) -> Option<GoalZone> {
        self.goal_zone.as_deref()?.parse().ok()
    }
}
