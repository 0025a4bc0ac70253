use std::collections::{HashMap, HashSet};

use storage::models::NormalizedPlayerName;
use storage::services::duplicates::{DEFAULT_SIMILARITY_THRESHOLD, name_similarity};
use tracing::warn;

use super::models::{FORMAT_VERSION, RosterFile, TeamData};
use crate::{ImporterError, Result};

pub struct RosterValidator;

impl RosterValidator {
    /// Fails when the roster has any error; warnings are returned for the
    /// caller to log.
    pub fn validate(roster: &RosterFile) -> Result<ValidationReport> {
        let report = Self::check(roster);

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }

    pub fn check(roster: &RosterFile) -> ValidationReport {
        let mut report = ValidationReport::default();

        if roster.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                roster.format_version, FORMAT_VERSION
            ));
        }

        if roster.club.name.trim().is_empty() {
            report.errors.push("Club name is required".to_string());
        }

        if roster.season.name.trim().is_empty() {
            report.errors.push("Season name is required".to_string());
        }
        if roster.season.end_date < roster.season.start_date {
            report
                .errors
                .push("Season end_date must be >= start_date".to_string());
        }

        if roster.teams.is_empty() {
            report.errors.push("At least one team is required".to_string());
        }

        let mut team_keys = HashSet::new();
        for team in &roster.teams {
            if team.name.trim().is_empty() {
                report.errors.push("Team name cannot be empty".to_string());
            }
            if team.category.trim().is_empty() {
                report
                    .errors
                    .push(format!("Team '{}' has no category", team.name));
            }
            if !team_keys.insert((team.name.trim(), team.category.trim())) {
                report.errors.push(format!(
                    "Duplicate team: '{}' ({})",
                    team.name, team.category
                ));
            }

            check_team(team, &mut report);
        }

        report
    }
}

fn check_team(team: &TeamData, report: &mut ValidationReport) {
    if team.players.is_empty() {
        report
            .warnings
            .push(format!("Team '{}' has no players", team.name));
        return;
    }

    if !team.players.iter().any(|player| player.is_goalkeeper) {
        report
            .warnings
            .push(format!("Team '{}' has no goalkeeper", team.name));
    }

    let mut numbers: HashMap<i32, &str> = HashMap::new();
    let mut names: HashMap<String, &str> = HashMap::new();

    for (idx, player) in team.players.iter().enumerate() {
        let label = format!("{}. {}", idx + 1, player.name);

        if player.name.trim().is_empty() {
            report.errors.push(format!(
                "Player {} of team '{}' has an empty name",
                idx + 1,
                team.name
            ));
            continue;
        }

        if !(0..=99).contains(&player.number) {
            report.errors.push(format!(
                "Player '{}' of team '{}': number {} is outside 0-99",
                label, team.name, player.number
            ));
        } else if let Some(other) = numbers.insert(player.number, &player.name) {
            report.errors.push(format!(
                "Team '{}': number {} is worn by both '{}' and '{}'",
                team.name, player.number, other, player.name
            ));
        }

        let key = NormalizedPlayerName::new(&player.name).key();
        if let Some(other) = names.insert(key, &player.name) {
            report.errors.push(format!(
                "Team '{}' lists '{}' twice (also as '{}')",
                team.name, player.name, other
            ));
        }
    }

    for (i, first) in team.players.iter().enumerate() {
        for second in &team.players[i + 1..] {
            let similarity = name_similarity(&first.name, &second.name);
            if (DEFAULT_SIMILARITY_THRESHOLD..1.0).contains(&similarity) {
                report.warnings.push(format!(
                    "Team '{}': '{}' and '{}' look like the same player ({:.2})",
                    team.name, first.name, second.name, similarity
                ));
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::models::{ClubData, PlayerData, SeasonData};
    use chrono::NaiveDate;
    use storage::models::Handedness;

    fn player(name: &str, number: i32, is_goalkeeper: bool) -> PlayerData {
        PlayerData {
            name: name.to_string(),
            number,
            handedness: Handedness::Right,
            is_goalkeeper,
        }
    }

    fn roster(players: Vec<PlayerData>) -> RosterFile {
        RosterFile {
            format_version: FORMAT_VERSION.to_string(),
            source: None,
            club: ClubData {
                name: "HC Dukla Praha".to_string(),
                logo_url: None,
            },
            season: SeasonData {
                name: "2024/2025".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            teams: vec![TeamData {
                name: "Dukla A".to_string(),
                category: "Men".to_string(),
                players,
            }],
        }
    }

    #[test]
    fn test_valid_roster() {
        let roster = roster(vec![
            player("Petr Svoboda", 1, true),
            player("Jan Novák", 7, false),
        ]);

        let report = RosterValidator::validate(&roster).unwrap();
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_rejects_unknown_format_version() {
        let mut roster = roster(vec![player("Petr Svoboda", 1, true)]);
        roster.format_version = "2.0.0".to_string();

        assert!(RosterValidator::validate(&roster).is_err());
    }

    #[test]
    fn test_rejects_reversed_season() {
        let mut roster = roster(vec![player("Petr Svoboda", 1, true)]);
        roster.season.end_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let report = RosterValidator::check(&roster);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("end_date"));
    }

    #[test]
    fn test_number_rules() {
        let roster = roster(vec![
            player("Petr Svoboda", 1, true),
            player("Jan Novák", 7, false),
            player("Tomáš Dvořák", 7, false),
            player("Karel Beneš", 120, false),
        ]);

        let report = RosterValidator::check(&roster);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.contains("number 7")));
        assert!(report.errors.iter().any(|e| e.contains("outside 0-99")));
    }

    #[test]
    fn test_same_player_listed_twice() {
        let roster = roster(vec![
            player("Jan Novák", 7, true),
            player("novak jan", 8, false),
        ]);

        let report = RosterValidator::check(&roster);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("twice"));
    }

    #[test]
    fn test_warnings_do_not_fail_validation() {
        let roster = roster(vec![
            player("Jan Novák", 7, false),
            player("Jan Novaak", 8, false),
        ]);

        let report = RosterValidator::validate(&roster).unwrap();
        assert!(report.warnings.iter().any(|w| w.contains("no goalkeeper")));
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("look like the same player"))
        );
    }
}
