use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use storage::models::{NormalizedPlayerName, Player};
use storage::services::duplicates::{DEFAULT_SIMILARITY_THRESHOLD, best_match};
use tracing::{info, warn};
use uuid::Uuid;

use super::models::{ClubData, PlayerData, RosterFile, SeasonData, TeamData};
use crate::Result;

const PLAYER_COLUMNS: &str = "player_id, name, number, handedness, is_goalkeeper, created_at";

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Reuse an existing player whose name is similar but not identical
    pub link_similar: bool,
    pub similarity_threshold: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            link_similar: false,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub club_created: bool,
    pub season_created: bool,
    pub teams_created: usize,
    pub players_created: usize,
    pub players_reused: usize,
    pub players_linked: usize,
    pub memberships_added: usize,
    pub similar_names: Vec<SimilarName>,
}

impl ImportSummary {
    pub fn log(&self) {
        info!(
            "Teams created: {}, players created: {}, reused: {}, linked: {}, roster entries added: {}",
            self.teams_created,
            self.players_created,
            self.players_reused,
            self.players_linked,
            self.memberships_added
        );

        for similar in &self.similar_names {
            if similar.linked {
                info!(
                    "Linked '{}' to existing player '{}' ({:.2})",
                    similar.imported, similar.existing, similar.similarity
                );
            } else {
                warn!(
                    "'{}' looks like existing player '{}' ({:.2}); created a new player, rerun with --link-similar to reuse",
                    similar.imported, similar.existing, similar.similarity
                );
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimilarName {
    pub imported: String,
    pub existing: String,
    pub existing_id: Uuid,
    pub similarity: f64,
    pub linked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerMatch {
    /// Same normalized name
    Exact(Uuid),
    Similar {
        player_id: Uuid,
        name: String,
        similarity: f64,
    },
    New,
}

/// How an imported name relates to the players already stored.
pub fn match_player(name: &str, known: &[Player], threshold: f64) -> PlayerMatch {
    let wanted = NormalizedPlayerName::new(name);
    if let Some(player) = known
        .iter()
        .find(|player| NormalizedPlayerName::new(&player.name) == wanted)
    {
        return PlayerMatch::Exact(player.player_id);
    }

    match best_match(name, known, threshold) {
        Some((player, similarity)) => PlayerMatch::Similar {
            player_id: player.player_id,
            name: player.name.clone(),
            similarity,
        },
        None => PlayerMatch::New,
    }
}

pub struct RosterImporter<'a> {
    pool: &'a PgPool,
    options: ImportOptions,
}

impl<'a> RosterImporter<'a> {
    pub fn new(pool: &'a PgPool, options: ImportOptions) -> Self {
        Self { pool, options }
    }

    /// Imports the whole roster in one transaction.
    pub async fn import_to_database(&self, roster: &RosterFile) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut tx = self.pool.begin().await?;

        let club_id = self
            .get_or_create_club(&roster.club, &mut tx, &mut summary)
            .await?;
        let season_id = self
            .get_or_create_season(&roster.season, &mut tx, &mut summary)
            .await?;

        let mut known = sqlx::query_as::<_, Player>(&format!("SELECT {PLAYER_COLUMNS} FROM players"))
            .fetch_all(&mut *tx)
            .await?;

        for team in &roster.teams {
            let team_id = self
                .get_or_create_team(team, club_id, season_id, &mut tx, &mut summary)
                .await?;

            for player in &team.players {
                let player_id = self
                    .resolve_player(player, &mut known, &mut tx, &mut summary)
                    .await?;

                if self.ensure_membership(player_id, team_id, &mut tx).await? {
                    summary.memberships_added += 1;
                }
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    async fn get_or_create_club(
        &self,
        club: &ClubData,
        tx: &mut Transaction<'_, Postgres>,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT club_id FROM clubs WHERE LOWER(name) = LOWER($1)",
        )
        .bind(club.name.trim())
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let club_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO clubs (name, logo_url) VALUES ($1, $2) RETURNING club_id",
        )
        .bind(club.name.trim())
        .bind(&club.logo_url)
        .fetch_one(&mut **tx)
        .await?;

        info!("Created club '{}'", club.name);
        summary.club_created = true;
        Ok(club_id)
    }

    async fn get_or_create_season(
        &self,
        season: &SeasonData,
        tx: &mut Transaction<'_, Postgres>,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let existing = sqlx::query_as::<_, (Uuid, NaiveDate, NaiveDate)>(
            "SELECT season_id, start_date, end_date FROM seasons WHERE name = $1",
        )
        .bind(season.name.trim())
        .fetch_optional(&mut **tx)
        .await?;

        if let Some((id, start_date, end_date)) = existing {
            if start_date != season.start_date || end_date != season.end_date {
                warn!(
                    "Season '{}' exists with dates {} - {}; keeping them",
                    season.name, start_date, end_date
                );
            }
            return Ok(id);
        }

        let season_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO seasons (name, start_date, end_date)
            VALUES ($1, $2, $3)
            RETURNING season_id
            "#,
        )
        .bind(season.name.trim())
        .bind(season.start_date)
        .bind(season.end_date)
        .fetch_one(&mut **tx)
        .await?;

        info!("Created season '{}'", season.name);
        summary.season_created = true;
        Ok(season_id)
    }

    async fn get_or_create_team(
        &self,
        team: &TeamData,
        club_id: Uuid,
        season_id: Uuid,
        tx: &mut Transaction<'_, Postgres>,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT team_id FROM teams
            WHERE club_id = $1 AND season_id = $2 AND name = $3 AND category = $4
            "#,
        )
        .bind(club_id)
        .bind(season_id)
        .bind(team.name.trim())
        .bind(team.category.trim())
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let team_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO teams (name, category, club_id, season_id)
            VALUES ($1, $2, $3, $4)
            RETURNING team_id
            "#,
        )
        .bind(team.name.trim())
        .bind(team.category.trim())
        .bind(club_id)
        .bind(season_id)
        .fetch_one(&mut **tx)
        .await?;

        info!("Created team '{}' ({})", team.name, team.category);
        summary.teams_created += 1;
        Ok(team_id)
    }

    async fn resolve_player(
        &self,
        player: &PlayerData,
        known: &mut Vec<Player>,
        tx: &mut Transaction<'_, Postgres>,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        match match_player(&player.name, known, self.options.similarity_threshold) {
            PlayerMatch::Exact(id) => {
                summary.players_reused += 1;
                Ok(id)
            }
            PlayerMatch::Similar {
                player_id,
                name,
                similarity,
            } => {
                summary.similar_names.push(SimilarName {
                    imported: player.name.clone(),
                    existing: name,
                    existing_id: player_id,
                    similarity,
                    linked: self.options.link_similar,
                });

                if self.options.link_similar {
                    summary.players_linked += 1;
                    return Ok(player_id);
                }

                self.create_player(player, known, tx, summary).await
            }
            PlayerMatch::New => self.create_player(player, known, tx, summary).await,
        }
    }

    async fn create_player(
        &self,
        player: &PlayerData,
        known: &mut Vec<Player>,
        tx: &mut Transaction<'_, Postgres>,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let created = sqlx::query_as::<_, Player>(&format!(
            r#"
            INSERT INTO players (name, number, handedness, is_goalkeeper)
            VALUES ($1, $2, $3, $4)
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(player.name.trim())
        .bind(player.number as i16)
        .bind(player.handedness.to_string())
        .bind(player.is_goalkeeper)
        .fetch_one(&mut **tx)
        .await?;

        summary.players_created += 1;
        let player_id = created.player_id;
        known.push(created);
        Ok(player_id)
    }

    /// Opens a membership unless one is already open; returns whether a row
    /// was added.
    async fn ensure_membership(
        &self,
        player_id: Uuid,
        team_id: Uuid,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO player_teams (player_id, team_id)
            SELECT $1, $2
            WHERE NOT EXISTS (
                SELECT 1 FROM player_teams
                WHERE player_id = $1 AND team_id = $2 AND left_at IS NULL
            )
            "#,
        )
        .bind(player_id)
        .bind(team_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
