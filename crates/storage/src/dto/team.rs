use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub name: String,
    pub category: String,
    pub club_id: Uuid,
    pub season_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}

/// Team with its club, season and current roster
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDetailResponse {
    pub team_id: Uuid,
    pub name: String,
    pub category: String,
    pub club: ClubInfo,
    pub season: SeasonInfo,
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClubInfo {
    pub club_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeasonInfo {
    pub season_id: Uuid,
    pub name: String,
}

/// A player currently on a team's roster
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct RosterEntry {
    pub player_id: Uuid,
    pub name: String,
    pub number: i16,
    pub handedness: String,
    pub is_goalkeeper: bool,
    pub joined_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,

    pub club_id: Uuid,

    pub season_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,

    pub club_id: Option<Uuid>,

    pub season_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddRosterPlayerRequest {
    pub player_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TeamFilter {
    pub club_id: Option<Uuid>,
    pub season_id: Option<Uuid>,
}

impl From<crate::models::Team> for TeamResponse {
    fn from(team: crate::models::Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            category: team.category,
            club_id: team.club_id,
            season_id: team.season_id,
            created_at: team.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_required() {
        let req = CreateTeamRequest {
            name: "Senior A".to_string(),
            category: "".to_string(),
            club_id: Uuid::new_v4(),
            season_id: Uuid::new_v4(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
        assert!(!errors.field_errors().contains_key("name"));
    }
}
