use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::dto::statistics::{
    MatchStatisticsResponse, PlayerStatistics, ScorePoint, TeamStatistics,
};
use crate::models::{EventKind, GameEvent, Match, SanctionType, ShotOutcome, ShotPosition, Side};

impl TeamStatistics {
    fn empty(team_id: Uuid) -> Self {
        Self {
            team_id,
            goals: 0,
            shots: 0,
            saves: 0,
            misses: 0,
            posts: 0,
            blocked: 0,
            shooting_efficiency: 0.0,
            seven_meter_goals: 0,
            seven_meter_attempts: 0,
            turnovers: 0,
            turnovers_by_kind: BTreeMap::new(),
            yellow_cards: 0,
            two_minutes: 0,
            red_cards: 0,
            blue_cards: 0,
            goals_by_zone: BTreeMap::new(),
            goals_by_position: BTreeMap::new(),
        }
    }

    fn record(&mut self, event: &GameEvent, kind: EventKind) {
        match kind {
            EventKind::Shot(outcome) => {
                self.shots += 1;
                match outcome {
                    ShotOutcome::Goal => self.goals += 1,
                    ShotOutcome::Save => self.saves += 1,
                    ShotOutcome::Miss => self.misses += 1,
                    ShotOutcome::Post => self.posts += 1,
                    ShotOutcome::Block => self.blocked += 1,
                }

                let position = event.shot_position();
                if position == Some(ShotPosition::SevenMeters) {
                    self.seven_meter_attempts += 1;
                    if kind.is_goal() {
                        self.seven_meter_goals += 1;
                    }
                }

                if kind.is_goal() {
                    if let Some(zone) = event.zone() {
                        *self.goals_by_zone.entry(zone.to_string()).or_default() += 1;
                    }
                    if let Some(position) = position {
                        *self.goals_by_position.entry(position.to_string()).or_default() += 1;
                    }
                }
            }
            EventKind::Turnover(turnover) => {
                self.turnovers += 1;
                *self.turnovers_by_kind.entry(turnover.to_string()).or_default() += 1;
            }
            EventKind::Sanction(sanction) => match sanction {
                SanctionType::Yellow => self.yellow_cards += 1,
                SanctionType::TwoMinutes => self.two_minutes += 1,
                SanctionType::Red => self.red_cards += 1,
                SanctionType::Blue => self.blue_cards += 1,
            },
        }
    }

    fn finish(mut self) -> Self {
        self.shooting_efficiency = efficiency(self.goals, self.shots);
        self
    }
}

impl PlayerStatistics {
    pub fn empty(player_id: Uuid) -> Self {
        Self {
            player_id,
            matches_played: 0,
            goals: 0,
            shots: 0,
            shooting_efficiency: 0.0,
            turnovers: 0,
            yellow_cards: 0,
            two_minutes: 0,
            red_cards: 0,
            blue_cards: 0,
        }
    }

    fn record(&mut self, kind: EventKind) {
        match kind {
            EventKind::Shot(outcome) => {
                self.shots += 1;
                if outcome == ShotOutcome::Goal {
                    self.goals += 1;
                }
            }
            EventKind::Turnover(_) => self.turnovers += 1,
            EventKind::Sanction(sanction) => match sanction {
                SanctionType::Yellow => self.yellow_cards += 1,
                SanctionType::TwoMinutes => self.two_minutes += 1,
                SanctionType::Red => self.red_cards += 1,
                SanctionType::Blue => self.blue_cards += 1,
            },
        }
    }

    fn finish(mut self) -> Self {
        self.shooting_efficiency = efficiency(self.goals, self.shots);
        self
    }
}

/// Goals per shot as a percentage rounded to one decimal.
pub fn efficiency(goals: u32, shots: u32) -> f64 {
    if shots == 0 {
        return 0.0;
    }
    (f64::from(goals) * 1000.0 / f64::from(shots)).round() / 10.0
}

/// Aggregates the events of one match. Events of teams that are not playing
/// in the match, or with an unknown vocabulary, are skipped.
pub fn match_statistics(game: &Match, events: &[GameEvent]) -> MatchStatisticsResponse {
    let mut home = TeamStatistics::empty(game.home_team_id);
    let mut away = TeamStatistics::empty(game.away_team_id);
    let mut players: HashMap<Uuid, PlayerStatistics> = HashMap::new();

    for event in events {
        let (Some(kind), Some(side)) = (event.kind(), game.side_of(event.team_id)) else {
            continue;
        };

        match side {
            Side::Home => home.record(event, kind),
            Side::Away => away.record(event, kind),
        }

        if let Some(player_id) = event.player_id {
            players
                .entry(player_id)
                .or_insert_with(|| PlayerStatistics {
                    matches_played: 1,
                    ..PlayerStatistics::empty(player_id)
                })
                .record(kind);
        }
    }

    let mut players: Vec<PlayerStatistics> =
        players.into_values().map(PlayerStatistics::finish).collect();
    players.sort_by(|a, b| b.goals.cmp(&a.goals).then(a.player_id.cmp(&b.player_id)));

    MatchStatisticsResponse {
        match_id: game.match_id,
        home: home.finish(),
        away: away.finish(),
        players,
        score_progression: score_progression(game, events),
    }
}

/// Running score after each goal, in match-time order.
pub fn score_progression(game: &Match, events: &[GameEvent]) -> Vec<ScorePoint> {
    let mut goals: Vec<(&GameEvent, Side)> = events
        .iter()
        .filter(|event| event.is_goal())
        .filter_map(|event| game.side_of(event.team_id).map(|side| (event, side)))
        .collect();
    goals.sort_by_key(|(event, _)| (event.timestamp, event.created_at));

    let (mut home, mut away) = (0, 0);
    goals
        .into_iter()
        .map(|(event, side)| {
            match side {
                Side::Home => home += 1,
                Side::Away => away += 1,
            }
            ScorePoint {
                timestamp: event.timestamp,
                home_score: home,
                away_score: away,
                team_id: event.team_id,
                player_id: event.player_id,
            }
        })
        .collect()
}

/// Totals for one player over every event recorded for them, across matches.
pub fn player_statistics(player_id: Uuid, events: &[GameEvent]) -> PlayerStatistics {
    let mut stats = PlayerStatistics::empty(player_id);
    let mut matches: Vec<Uuid> = Vec::new();

    for event in events.iter().filter(|e| e.player_id == Some(player_id)) {
        if !matches.contains(&event.match_id) {
            matches.push(event.match_id);
        }
        if let Some(kind) = event.kind() {
            stats.record(kind);
        }
    }

    stats.matches_played = matches.len() as u32;
    stats.finish()
}
