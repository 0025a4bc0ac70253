use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationParams, validate_not_blank};
use crate::models::{Handedness, Player};

/// Response containing basic player information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub player_id: Uuid,
    pub name: String,
    pub number: i16,
    pub handedness: String,
    pub is_goalkeeper: bool,
    pub created_at: chrono::NaiveDateTime,
}

/// Request payload for creating a new player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(range(min = 0, max = 99, message = "Number must be between 0 and 99"))]
    pub number: i16,

    #[serde(default)]
    pub handedness: Handedness,

    #[serde(default)]
    pub is_goalkeeper: bool,

    /// Team whose roster the new player joins right away.
    pub team_id: Option<Uuid>,
}

/// Request payload for updating an existing player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 99, message = "Number must be between 0 and 99"))]
    pub number: Option<i16>,

    pub handedness: Option<Handedness>,

    pub is_goalkeeper: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PlayerFilter {
    /// Case-insensitive substring of the player name
    pub search: Option<String>,
    /// Only players currently on this team's roster
    pub team_id: Option<Uuid>,
    pub is_goalkeeper: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PlayerFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let Some(ref search) = self.search
            && search.chars().count() > 255
        {
            return Err("search must be at most 255 characters".to_string());
        }

        Ok(())
    }

    /// `ILIKE` pattern for the search term with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        let search = self.search.as_deref()?.trim();
        if search.is_empty() {
            return None;
        }
        let escaped = search
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Some(format!("%{}%", escaped))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DuplicateQuery {
    /// Minimum name similarity in `[0, 1]`
    pub threshold: Option<f64>,
}

impl DuplicateQuery {
    pub fn threshold(&self) -> Result<f64, String> {
        let threshold = self
            .threshold
            .unwrap_or(crate::services::duplicates::DEFAULT_SIMILARITY_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            return Err("threshold must be between 0 and 1".to_string());
        }
        Ok(threshold)
    }
}

/// Two players whose names look like the same person
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DuplicatePlayerPair {
    pub first: Player,
    pub second: Player,
    pub similarity: f64,
    pub same_number: bool,
}

/// One stint of the player on a team
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PlayerTeamHistoryEntry {
    pub team_id: Uuid,
    pub team_name: String,
    pub category: String,
    pub club_name: String,
    pub season_name: String,
    pub joined_at: chrono::NaiveDateTime,
    pub left_at: Option<chrono::NaiveDateTime>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.player_id,
            name: player.name,
            number: player.number,
            handedness: player.handedness,
            is_goalkeeper: player.is_goalkeeper,
            created_at: player.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, number: i16) -> CreatePlayerRequest {
        CreatePlayerRequest {
            name: name.to_string(),
            number,
            handedness: Handedness::Left,
            is_goalkeeper: false,
            team_id: None,
        }
    }

    #[test]
    fn test_number_bounds() {
        assert!(request("Dika Mem", 0).validate().is_ok());
        assert!(request("Dika Mem", 99).validate().is_ok());
        assert!(request("Dika Mem", -1).validate().is_err());
        assert!(request("Dika Mem", 100).validate().is_err());
    }

    #[test]
    fn test_name_required() {
        assert!(request("", 10).validate().is_err());
        assert!(request("   ", 10).validate().is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let req: CreatePlayerRequest =
            serde_json::from_str(r#"{"name": "Andreas Wolff", "number": 33}"#).unwrap();
        assert_eq!(req.handedness, Handedness::Right);
        assert!(!req.is_goalkeeper);
        assert!(req.team_id.is_none());
    }

    #[test]
    fn test_update_number_bounds() {
        let req = UpdatePlayerRequest {
            name: None,
            number: Some(120),
            handedness: None,
            is_goalkeeper: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("number"));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let filter = PlayerFilter {
            search: Some(" 50%_off ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern().as_deref(), Some("%50\\%\\_off%"));

        let filter = PlayerFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), None);
    }

    #[test]
    fn test_duplicate_threshold_bounds() {
        assert_eq!(DuplicateQuery::default().threshold(), Ok(0.9));
        assert!(DuplicateQuery { threshold: Some(1.5) }.threshold().is_err());
    }
}
