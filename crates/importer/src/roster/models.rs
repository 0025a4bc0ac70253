//! On-disk roster format: one club, one season, and the teams it fields with
//! their players.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use storage::models::Handedness;

pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub club: ClubData,
    pub season: SeasonData,
    pub teams: Vec<TeamData>,
}

impl RosterFile {
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|team| team.players.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(rename = "type")]
    pub r#type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Federation,
    Spreadsheet,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonData {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamData {
    pub name: String,
    pub category: String,
    pub players: Vec<PlayerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    pub name: String,
    pub number: i32,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub is_goalkeeper: bool,
}
