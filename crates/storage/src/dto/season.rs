use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeasonResponse {
    pub season_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSeasonRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSeasonRequest {
    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        return Err("End date must be on or after start date");
    }
    Ok(())
}

impl CreateSeasonRequest {
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_date_order(self.start_date, self.end_date)
    }
}

impl UpdateSeasonRequest {
    /// Checks the dates that will be stored once merged with `existing`.
    pub fn validate_dates(&self, existing: &crate::models::Season) -> Result<(), &'static str> {
        check_date_order(
            self.start_date.unwrap_or(existing.start_date),
            self.end_date.unwrap_or(existing.end_date),
        )
    }
}

impl From<crate::models::Season> for SeasonResponse {
    fn from(season: crate::models::Season) -> Self {
        Self {
            season_id: season.season_id,
            name: season.name,
            start_date: season.start_date,
            end_date: season.end_date,
            created_at: season.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_before_start_rejected() {
        let req = CreateSeasonRequest {
            name: "2024/25".to_string(),
            start_date: date(2025, 6, 30),
            end_date: date(2024, 8, 1),
        };
        assert!(req.validate().is_ok());
        assert!(req.validate_dates().is_err());
    }

    #[test]
    fn test_update_checks_merged_dates() {
        let existing = crate::models::Season {
            season_id: Uuid::new_v4(),
            name: "2024/25".to_string(),
            start_date: date(2024, 8, 1),
            end_date: date(2025, 6, 30),
            created_at: chrono::NaiveDateTime::default(),
        };
        let req = UpdateSeasonRequest {
            name: None,
            start_date: Some(date(2025, 7, 1)),
            end_date: None,
        };
        assert!(req.validate_dates(&existing).is_err());
    }
}
