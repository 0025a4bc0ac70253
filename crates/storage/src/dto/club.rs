use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClubResponse {
    pub club_id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClubRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub logo_url: Option<String>,
}

impl From<crate::models::Club> for ClubResponse {
    fn from(club: crate::models::Club) -> Self {
        Self {
            club_id: club.club_id,
            name: club.name,
            logo_url: club.logo_url,
            created_at: club.created_at,
        }
    }
}
