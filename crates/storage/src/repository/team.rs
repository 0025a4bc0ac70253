use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::team::{
    ClubInfo, CreateTeamRequest, RosterEntry, SeasonInfo, TeamDetailResponse, TeamFilter,
    UpdateTeamRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Team;

const TEAM_COLUMNS: &str = "team_id, name, category, club_id, season_id, created_at";

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &TeamFilter) -> Result<Vec<Team>> {
        let mut query = QueryBuilder::new(format!("SELECT {TEAM_COLUMNS} FROM teams WHERE 1=1"));

        if let Some(club_id) = filter.club_id {
            query.push(" AND club_id = ");
            query.push_bind(club_id);
        }

        if let Some(season_id) = filter.season_id {
            query.push(" AND season_id = ");
            query.push_bind(season_id);
        }

        query.push(" ORDER BY name, category");

        let teams = query.build_query_as::<Team>().fetch_all(self.pool).await?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Team with club, season and the players currently on its roster
    pub async fn find_detailed(&self, id: Uuid) -> Result<TeamDetailResponse> {
        let team = self.find_by_id(id).await?;

        let (club_name,): (String,) = sqlx::query_as("SELECT name FROM clubs WHERE club_id = $1")
            .bind(team.club_id)
            .fetch_one(self.pool)
            .await?;

        let (season_name,): (String,) =
            sqlx::query_as("SELECT name FROM seasons WHERE season_id = $1")
                .bind(team.season_id)
                .fetch_one(self.pool)
                .await?;

        let players = self.roster(team.team_id).await?;

        Ok(TeamDetailResponse {
            team_id: team.team_id,
            name: team.name,
            category: team.category,
            club: ClubInfo {
                club_id: team.club_id,
                name: club_name,
            },
            season: SeasonInfo {
                season_id: team.season_id,
                name: season_name,
            },
            players,
        })
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (name, category, club_id, season_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(req.name.trim())
        .bind(req.category.trim())
        .bind(req.club_id)
        .bind(req.season_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Team"))
    }

    pub async fn update(&self, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let name = req.name.as_deref().map_or(existing.name.as_str(), str::trim);
        let category = req
            .category
            .as_deref()
            .map_or(existing.category.as_str(), str::trim);
        let club_id = req.club_id.unwrap_or(existing.club_id);
        let season_id = req.season_id.unwrap_or(existing.season_id);

        sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET name = $2, category = $3, club_id = $4, season_id = $5
            WHERE team_id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(existing.team_id)
        .bind(name)
        .bind(category)
        .bind(club_id)
        .bind(season_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_context("Team"))?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Players with an open membership, by shirt number
    pub async fn roster(&self, team_id: Uuid) -> Result<Vec<RosterEntry>> {
        let roster = sqlx::query_as::<_, RosterEntry>(
            r#"
            SELECT p.player_id, p.name, p.number, p.handedness, p.is_goalkeeper, pt.joined_at
            FROM player_teams pt
            JOIN players p ON pt.player_id = p.player_id
            WHERE pt.team_id = $1 AND pt.left_at IS NULL
            ORDER BY p.number, p.name
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(roster)
    }

    pub async fn has_player(&self, team_id: Uuid, player_id: Uuid) -> Result<bool> {
        let on_roster = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM player_teams
                WHERE team_id = $1 AND player_id = $2 AND left_at IS NULL
            )
            "#,
        )
        .bind(team_id)
        .bind(player_id)
        .fetch_one(self.pool)
        .await?;

        Ok(on_roster)
    }

    pub async fn add_player(&self, team_id: Uuid, player_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO player_teams (player_id, team_id) VALUES ($1, $2)")
            .bind(player_id)
            .bind(team_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_unique_violation() {
                    StorageError::ConstraintViolation(
                        "Player is already on this team's roster".to_string(),
                    )
                } else {
                    err.with_constraint_context("Roster entry")
                }
            })?;

        Ok(())
    }

    /// Closes the player's open membership; the stint stays in their history.
    pub async fn remove_player(&self, team_id: Uuid, player_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE player_teams
            SET left_at = NOW()
            WHERE team_id = $1 AND player_id = $2 AND left_at IS NULL
            "#,
        )
        .bind(team_id)
        .bind(player_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{seed_match, seed_player};

    #[sqlx::test(migrations = "./migrations")]
    async fn test_has_player_follows_open_membership(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = TeamRepository::new(&pool);
        let player_id = seed_player(&pool, "Jan Novak", 7).await;

        assert!(!repo.has_player(game.home_team_id, player_id).await.unwrap());

        repo.add_player(game.home_team_id, player_id).await.unwrap();
        assert!(repo.has_player(game.home_team_id, player_id).await.unwrap());
        assert!(!repo.has_player(game.away_team_id, player_id).await.unwrap());

        repo.remove_player(game.home_team_id, player_id).await.unwrap();
        assert!(!repo.has_player(game.home_team_id, player_id).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_adding_player_twice_conflicts(pool: PgPool) {
        let game = seed_match(&pool).await;
        let repo = TeamRepository::new(&pool);
        let player_id = seed_player(&pool, "Anna Berg", 11).await;

        repo.add_player(game.home_team_id, player_id).await.unwrap();
        assert!(matches!(
            repo.add_player(game.home_team_id, player_id).await,
            Err(StorageError::ConstraintViolation(_))
        ));
    }
}
