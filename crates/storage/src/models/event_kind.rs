use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum EventType {
    Shot,
    Turnover,
    Sanction,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum ShotOutcome {
    Goal,
    Save,
    Miss,
    Post,
    Block,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum TurnoverKind {
    Pass,
    Catch,
    Dribble,
    Steps,
    Area,
    OffensiveFoul,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum SanctionType {
    Yellow,
    TwoMinutes,
    Red,
    Blue,
}

/// Court position the shot was taken from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum ShotPosition {
    LeftWing,
    LeftBack,
    CenterBack,
    RightBack,
    RightWing,
    Pivot,
    SevenMeters,
    FastBreak,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum ShotDistance {
    SixMeters,
    SevenMeters,
    NineMeters,
}

/// One of the nine cells of the goal face, seen from the shooter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
pub enum GoalZone {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A type/subtype pair that is known to be consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Shot(ShotOutcome),
    Turnover(TurnoverKind),
    Sanction(SanctionType),
}

impl EventKind {
    pub fn parse(event_type: EventType, subtype: &str) -> Result<Self, String> {
        let kind = match event_type {
            EventType::Shot => subtype.parse().map(Self::Shot).ok(),
            EventType::Turnover => subtype.parse().map(Self::Turnover).ok(),
            EventType::Sanction => subtype.parse().map(Self::Sanction).ok(),
        };

        kind.ok_or_else(|| {
            format!(
                "'{}' is not a valid {} subtype (expected one of: {})",
                subtype,
                event_type,
                event_type.subtypes().join(", ")
            )
        })
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Self::Shot(_) => EventType::Shot,
            Self::Turnover(_) => EventType::Turnover,
            Self::Sanction(_) => EventType::Sanction,
        }
    }

    pub fn subtype(&self) -> String {
        match self {
            Self::Shot(outcome) => outcome.to_string(),
            Self::Turnover(kind) => kind.to_string(),
            Self::Sanction(sanction) => sanction.to_string(),
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Self::Shot(ShotOutcome::Goal))
    }

    /// Shots that reached the goal face and can carry a goal zone.
    pub fn is_on_target(&self) -> bool {
        matches!(self, Self::Shot(ShotOutcome::Goal | ShotOutcome::Save))
    }

    pub fn sanction(&self) -> Option<SanctionType> {
        match self {
            Self::Sanction(sanction) => Some(*sanction),
            _ => None,
        }
    }
}

impl EventType {
    pub fn subtypes(self) -> Vec<String> {
        match self {
            Self::Shot => ShotOutcome::iter().map(|s| s.to_string()).collect(),
            Self::Turnover => TurnoverKind::iter().map(|s| s.to_string()).collect(),
            Self::Sanction => SanctionType::iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_must_match_type() {
        assert_eq!(
            EventKind::parse(EventType::Shot, "Goal"),
            Ok(EventKind::Shot(ShotOutcome::Goal))
        );
        assert!(EventKind::parse(EventType::Shot, "Steps").is_err());
        assert!(EventKind::parse(EventType::Turnover, "Red").is_err());
        assert_eq!(
            EventKind::parse(EventType::Sanction, "TwoMinutes"),
            Ok(EventKind::Sanction(SanctionType::TwoMinutes))
        );
    }

    #[test]
    fn test_invalid_subtype_lists_alternatives() {
        let err = EventKind::parse(EventType::Turnover, "Goal").unwrap_err();
        assert!(err.contains("Turnover"));
        assert!(err.contains("OffensiveFoul"));
    }

    #[test]
    fn test_on_target_shots() {
        assert!(EventKind::Shot(ShotOutcome::Goal).is_on_target());
        assert!(EventKind::Shot(ShotOutcome::Save).is_on_target());
        assert!(!EventKind::Shot(ShotOutcome::Post).is_on_target());
        assert!(!EventKind::Turnover(TurnoverKind::Pass).is_on_target());
    }

    #[test]
    fn test_status_and_handedness_strings() {
        assert_eq!(MatchStatus::InProgress.to_string(), "in_progress");
        assert_eq!("completed".parse::<MatchStatus>().unwrap(), MatchStatus::Completed);
        assert_eq!(Handedness::Left.to_string(), "left");
        assert_eq!(
            serde_json::to_string(&MatchStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
