//! Seed rows for repository tests run against a migrated database.

use sqlx::PgPool;
use uuid::Uuid;

pub struct SeededMatch {
    pub match_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

/// A club with two teams in one season and a pending match between them.
pub async fn seed_match(pool: &PgPool) -> SeededMatch {
    let club_id: Uuid =
        sqlx::query_scalar("INSERT INTO clubs (name) VALUES ('HC Test') RETURNING club_id")
            .fetch_one(pool)
            .await
            .unwrap();

    let season_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO seasons (name, start_date, end_date)
        VALUES ('2024/25', '2024-09-01', '2025-06-30')
        RETURNING season_id
        "#,
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let mut team_ids = Vec::new();
    for name in ["Men A", "Men B"] {
        let team_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO teams (name, category, club_id, season_id)
            VALUES ($1, 'Senior', $2, $3)
            RETURNING team_id
            "#,
        )
        .bind(name)
        .bind(club_id)
        .bind(season_id)
        .fetch_one(pool)
        .await
        .unwrap();
        team_ids.push(team_id);
    }

    let match_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO matches (date, home_team_id, away_team_id)
        VALUES (NOW(), $1, $2)
        RETURNING match_id
        "#,
    )
    .bind(team_ids[0])
    .bind(team_ids[1])
    .fetch_one(pool)
    .await
    .unwrap();

    SeededMatch {
        match_id,
        home_team_id: team_ids[0],
        away_team_id: team_ids[1],
    }
}

pub async fn seed_player(pool: &PgPool, name: &str, number: i16) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO players (name, number, handedness) VALUES ($1, $2, 'right') RETURNING player_id",
    )
    .bind(name)
    .bind(number)
    .fetch_one(pool)
    .await
    .unwrap()
}
