use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::services::match_clock::{LiveClock, VideoClock};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub date: DateTime<Utc>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub real_time_first_half_start: Option<DateTime<Utc>>,
    pub real_time_first_half_end: Option<DateTime<Utc>>,
    pub real_time_second_half_start: Option<DateTime<Utc>>,
    pub real_time_second_half_end: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub first_half_video_start: Option<f64>,
    pub second_half_video_start: Option<f64>,
    pub created_at: chrono::NaiveDateTime,
}

/// Which side of the scoreboard a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Match {
    pub fn side_of(&self, team_id: Uuid) -> Option<Side> {
        if team_id == self.home_team_id {
            Some(Side::Home)
        } else if team_id == self.away_team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn live_clock(&self) -> LiveClock {
        LiveClock {
            first_half_start: self.real_time_first_half_start,
            first_half_end: self.real_time_first_half_end,
            second_half_start: self.real_time_second_half_start,
            second_half_end: self.real_time_second_half_end,
        }
    }

    pub fn video_clock(&self) -> VideoClock {
        VideoClock {
            first_half_start: self.first_half_video_start,
            second_half_start: self.second_half_video_start,
        }
    }
}
