use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{EventKind, EventType, GameEvent, GoalZone, ShotDistance, ShotPosition};
use crate::services::match_clock::format_clock;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameEventResponse {
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
    /// `MM:SS` rendering of `timestamp`
    pub match_time: String,
    pub video_timestamp: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

/// Request payload for recording an in-match action.
///
/// Without `timestamp` the server stamps the event from the match clock:
/// from `video_time` against the video markers when given, otherwise from
/// the live clock.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGameEventRequest {
    pub match_id: Uuid,

    pub team_id: Uuid,

    pub player_id: Option<Uuid>,

    pub event_type: EventType,

    #[validate(length(min = 1, max = 30, message = "Subtype is required"))]
    pub subtype: String,

    pub position: Option<ShotPosition>,

    pub distance: Option<ShotDistance>,

    pub goal_zone: Option<GoalZone>,

    /// Seconds since kick-off
    #[validate(range(min = 0, message = "Timestamp cannot be negative"))]
    pub timestamp: Option<i32>,

    /// Video-player position in seconds when the action was tagged
    #[validate(range(min = 0.0, message = "Video time cannot be negative"))]
    pub video_time: Option<f64>,
}

impl CreateGameEventRequest {
    /// Checks the type/subtype pair and the metadata that only some events
    /// may carry.
    pub fn event_kind(&self) -> Result<EventKind, String> {
        let kind = EventKind::parse(self.event_type, &self.subtype)?;

        let has_shot_metadata =
            self.position.is_some() || self.distance.is_some() || self.goal_zone.is_some();
        if has_shot_metadata && kind.event_type() != EventType::Shot {
            return Err(format!(
                "{} events cannot carry shot position, distance or goal zone",
                kind.event_type()
            ));
        }

        if self.goal_zone.is_some() && !kind.is_on_target() {
            return Err(format!(
                "goal zone is only recorded for shots on target, not '{}'",
                self.subtype
            ));
        }

        Ok(kind)
    }
}

impl From<GameEvent> for GameEventResponse {
    fn from(event: GameEvent) -> Self {
        Self {
            event_id: event.event_id,
            match_id: event.match_id,
            team_id: event.team_id,
            player_id: event.player_id,
            event_type: event.event_type,
            subtype: event.subtype,
            position: event.position,
            distance: event.distance,
            goal_zone: event.goal_zone,
            sanction_type: event.sanction_type,
            match_time: format_clock(event.timestamp),
            timestamp: event.timestamp,
            video_timestamp: event.video_timestamp,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SanctionType, ShotOutcome};

    fn request(event_type: EventType, subtype: &str) -> CreateGameEventRequest {
        CreateGameEventRequest {
            match_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            player_id: None,
            event_type,
            subtype: subtype.to_string(),
            position: None,
            distance: None,
            goal_zone: None,
            timestamp: None,
            video_time: None,
        }
    }

    #[test]
    fn test_shot_with_metadata() {
        let mut req = request(EventType::Shot, "Goal");
        req.position = Some(ShotPosition::LeftWing);
        req.distance = Some(ShotDistance::SixMeters);
        req.goal_zone = Some(GoalZone::BottomRight);
        assert_eq!(req.event_kind(), Ok(EventKind::Shot(ShotOutcome::Goal)));
    }

    #[test]
    fn test_subtype_must_belong_to_type() {
        assert!(request(EventType::Shot, "Pass").event_kind().is_err());
        assert!(request(EventType::Sanction, "Goal").event_kind().is_err());
        assert_eq!(
            request(EventType::Sanction, "Red").event_kind(),
            Ok(EventKind::Sanction(SanctionType::Red))
        );
    }

    #[test]
    fn test_shot_metadata_only_on_shots() {
        let mut req = request(EventType::Turnover, "Pass");
        req.position = Some(ShotPosition::Pivot);
        assert!(req.event_kind().is_err());
    }

    #[test]
    fn test_goal_zone_only_on_target() {
        let mut req = request(EventType::Shot, "Miss");
        req.goal_zone = Some(GoalZone::TopLeft);
        assert!(req.event_kind().is_err());

        req.subtype = "Save".to_string();
        assert!(req.event_kind().is_ok());
    }

    #[test]
    fn test_negative_times_rejected() {
        let mut req = request(EventType::Shot, "Goal");
        req.timestamp = Some(-1);
        assert!(req.validate().is_err());

        let mut req = request(EventType::Shot, "Goal");
        req.video_time = Some(-0.5);
        assert!(req.validate().is_err());

        let mut req = request(EventType::Shot, "Goal");
        req.video_time = Some(160.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_event_type_is_capitalised_on_the_wire() {
        let req: CreateGameEventRequest = serde_json::from_value(serde_json::json!({
            "match_id": Uuid::new_v4(),
            "team_id": Uuid::new_v4(),
            "event_type": "Turnover",
            "subtype": "Steps",
        }))
        .unwrap();
        assert_eq!(req.event_type, EventType::Turnover);
        assert!(req.event_kind().is_ok());
    }
}
