//! Rows for `#[sqlx::test]` databases.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Division, Sport};

pub struct SeededFixture {
    pub division: Division,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub fixture_id: Uuid,
}

impl SeededFixture {
    pub async fn points(&self, pool: &PgPool) -> (i32, i32) {
        (
            team_points(pool, self.home_team_id).await,
            team_points(pool, self.away_team_id).await,
        )
    }
}

/// A darts fixture, Lonsdale at home to Cartmel.
pub async fn fixture(pool: &PgPool) -> SeededFixture {
    fixture_in(pool, "Open Darts", Sport::Darts).await
}

pub async fn fixture_in(pool: &PgPool, division_name: &str, sport: Sport) -> SeededFixture {
    let division_id: Uuid =
        sqlx::query_scalar("INSERT INTO divisions (name, sport) VALUES ($1, $2) RETURNING division_id")
            .bind(division_name)
            .bind(sport.as_str())
            .fetch_one(pool)
            .await
            .unwrap();

    let home_team_id = team(pool, division_id, "Lonsdale").await;
    let away_team_id = team(pool, division_id, "Cartmel").await;
    let scheduled_at = NaiveDate::from_ymd_opt(2025, 10, 6)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let fixture_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO fixtures (division_id, home_team_id, away_team_id, scheduled_at, week)
        VALUES ($1, $2, $3, $4, 2)
        RETURNING fixture_id
        "#,
    )
    .bind(division_id)
    .bind(home_team_id)
    .bind(away_team_id)
    .bind(scheduled_at)
    .fetch_one(pool)
    .await
    .unwrap();

    SeededFixture {
        division: Division {
            division_id,
            name: division_name.to_string(),
            sport,
        },
        home_team_id,
        away_team_id,
        fixture_id,
    }
}

pub async fn team(pool: &PgPool, division_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO teams (division_id, name) VALUES ($1, $2) RETURNING team_id")
        .bind(division_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn captain(pool: &PgPool, team_id: Uuid, email: &str) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO captains (email, password_hash, team_id)
        VALUES ($1, 'unused', $2)
        RETURNING captain_id
        "#,
    )
    .bind(email)
    .bind(team_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn team_points(pool: &PgPool, team_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT points FROM teams WHERE team_id = $1")
        .bind(team_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn result_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM results")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn recorded_score(pool: &PgPool, fixture_id: Uuid) -> Option<(i32, i32)> {
    sqlx::query_as("SELECT home_score, away_score FROM results WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}
