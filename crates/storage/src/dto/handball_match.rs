use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::PaginationParams;
use crate::models::{Match, MatchStatus};
use crate::services::match_clock::{ClockAction, MatchPeriod, format_clock};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
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

/// Request payload for scheduling a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    pub date: DateTime<Utc>,

    pub home_team_id: Uuid,

    pub away_team_id: Uuid,

    #[serde(default)]
    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub home_score: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub away_score: i32,

    #[serde(default)]
    pub status: MatchStatus,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub video_url: Option<String>,

    #[validate(range(min = 0.0, message = "Video offset cannot be negative"))]
    pub first_half_video_start: Option<f64>,

    #[validate(range(min = 0.0, message = "Video offset cannot be negative"))]
    pub second_half_video_start: Option<f64>,
}

/// Partial update of a match, including the clock and video markers
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    pub date: Option<DateTime<Utc>>,

    pub home_team_id: Option<Uuid>,

    pub away_team_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub home_score: Option<i32>,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub away_score: Option<i32>,

    pub status: Option<MatchStatus>,

    pub real_time_first_half_start: Option<DateTime<Utc>>,

    pub real_time_first_half_end: Option<DateTime<Utc>>,

    pub real_time_second_half_start: Option<DateTime<Utc>>,

    pub real_time_second_half_end: Option<DateTime<Utc>>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub video_url: Option<String>,

    #[validate(range(min = 0.0, message = "Video offset cannot be negative"))]
    pub first_half_video_start: Option<f64>,

    #[validate(range(min = 0.0, message = "Video offset cannot be negative"))]
    pub second_half_video_start: Option<f64>,
}

const SAME_TEAMS: &str = "Home and away teams must be different";

impl CreateMatchRequest {
    pub fn validate_teams(&self) -> Result<(), &'static str> {
        if self.home_team_id == self.away_team_id {
            return Err(SAME_TEAMS);
        }
        Ok(())
    }
}

impl UpdateMatchRequest {
    /// Checks the pairing that will be stored once merged with `existing`.
    pub fn validate_teams(&self, existing: &Match) -> Result<(), &'static str> {
        let home = self.home_team_id.unwrap_or(existing.home_team_id);
        let away = self.away_team_id.unwrap_or(existing.away_team_id);
        if home == away {
            return Err(SAME_TEAMS);
        }
        Ok(())
    }

    /// Second-half markers cannot precede first-half ones after the merge.
    pub fn validate_markers(&self, existing: &Match) -> Result<(), &'static str> {
        let markers = [
            self.real_time_first_half_start
                .or(existing.real_time_first_half_start),
            self.real_time_first_half_end
                .or(existing.real_time_first_half_end),
            self.real_time_second_half_start
                .or(existing.real_time_second_half_start),
            self.real_time_second_half_end
                .or(existing.real_time_second_half_end),
        ];
        let recorded: Vec<DateTime<Utc>> = markers.into_iter().flatten().collect();
        if recorded.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err("Clock markers must be in chronological order");
        }

        let first = self.first_half_video_start.or(existing.first_half_video_start);
        let second = self
            .second_half_video_start
            .or(existing.second_half_video_start);
        if let (Some(first), Some(second)) = (first, second)
            && second < first
        {
            return Err("Second half video start must not precede the first half");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct MatchFilter {
    /// Matches where this team plays home or away
    pub team_id: Option<Uuid>,
    pub season_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl MatchFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClockActionRequest {
    pub action: ClockAction,
}

/// Live clock reading for a match
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClockStateResponse {
    pub match_id: Uuid,
    pub status: String,
    pub period: MatchPeriod,
    pub is_running: bool,
    /// Seconds since kick-off, absent while the clock has not started
    pub elapsed_seconds: Option<i32>,
    /// `MM:SS` rendering of `elapsed_seconds`, blank while stopped
    pub display: String,
    pub server_time: DateTime<Utc>,
    pub real_time_first_half_start: Option<DateTime<Utc>>,
    pub real_time_first_half_end: Option<DateTime<Utc>>,
    pub real_time_second_half_start: Option<DateTime<Utc>>,
    pub real_time_second_half_end: Option<DateTime<Utc>>,
}

impl ClockStateResponse {
    /// Reads the match clock at `now`.
    pub fn at(game: &Match, now: DateTime<Utc>) -> Self {
        let clock = game.live_clock();
        let elapsed_seconds = clock.elapsed_seconds(now);

        Self {
            match_id: game.match_id,
            status: game.status.clone(),
            period: clock.period(now),
            is_running: clock.is_running(now),
            elapsed_seconds,
            display: elapsed_seconds.map(format_clock).unwrap_or_default(),
            server_time: now,
            real_time_first_half_start: clock.first_half_start,
            real_time_first_half_end: clock.first_half_end,
            real_time_second_half_start: clock.second_half_start,
            real_time_second_half_end: clock.second_half_end,
        }
    }
}

impl From<Match> for MatchResponse {
    fn from(game: Match) -> Self {
        Self {
            match_id: game.match_id,
            date: game.date,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            home_score: game.home_score,
            away_score: game.away_score,
            status: game.status,
            real_time_first_half_start: game.real_time_first_half_start,
            real_time_first_half_end: game.real_time_first_half_end,
            real_time_second_half_start: game.real_time_second_half_start,
            real_time_second_half_end: game.real_time_second_half_end,
            video_url: game.video_url,
            first_half_video_start: game.first_half_video_start,
            second_half_video_start: game.second_half_video_start,
            created_at: game.created_at,
        }
    }
}
