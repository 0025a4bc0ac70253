use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamStatistics {
    pub team_id: Uuid,
    pub goals: u32,
    pub shots: u32,
    pub saves: u32,
    pub misses: u32,
    pub posts: u32,
    pub blocked: u32,
    /// Goals per shot, in percent
    pub shooting_efficiency: f64,
    pub seven_meter_goals: u32,
    pub seven_meter_attempts: u32,
    pub turnovers: u32,
    pub turnovers_by_kind: BTreeMap<String, u32>,
    pub yellow_cards: u32,
    pub two_minutes: u32,
    pub red_cards: u32,
    pub blue_cards: u32,
    pub goals_by_zone: BTreeMap<String, u32>,
    pub goals_by_position: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerStatistics {
    pub player_id: Uuid,
    pub matches_played: u32,
    pub goals: u32,
    pub shots: u32,
    pub shooting_efficiency: f64,
    pub turnovers: u32,
    pub yellow_cards: u32,
    pub two_minutes: u32,
    pub red_cards: u32,
    pub blue_cards: u32,
}

/// Score right after a goal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorePoint {
    pub timestamp: i32,
    pub home_score: i32,
    pub away_score: i32,
    pub team_id: Uuid,
    pub player_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchStatisticsResponse {
    pub match_id: Uuid,
    pub home: TeamStatistics,
    pub away: TeamStatistics,
    pub players: Vec<PlayerStatistics>,
    pub score_progression: Vec<ScorePoint>,
}
