use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NominationFixture, PoolNomination};

pub struct PoolNominationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PoolNominationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a fixture with its division name and both team ids
    pub async fn find_fixture(&self, fixture_id: Uuid) -> Result<NominationFixture> {
        sqlx::query_as::<_, NominationFixture>(
            r#"
            SELECT f.fixture_id, d.name AS division_name, d.sport,
                   f.home_team_id, f.away_team_id
            FROM fixtures f
            JOIN divisions d ON d.division_id = f.division_id
            WHERE f.fixture_id = $1
            "#,
        )
        .bind(fixture_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// The team a captain account belongs to
    pub async fn captain_team(&self, captain_id: Uuid) -> Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>("SELECT team_id FROM captains WHERE captain_id = $1")
            .bind(captain_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Nominations of both teams for a fixture, by game
    pub async fn list_for_fixture(&self, fixture_id: Uuid) -> Result<Vec<PoolNomination>> {
        let nominations = sqlx::query_as::<_, PoolNomination>(
            r#"
            SELECT nomination_id, fixture_id, team_id, game_number, player_name, locked_at
            FROM pool_nominations
            WHERE fixture_id = $1
            ORDER BY game_number, locked_at
            "#,
        )
        .bind(fixture_id)
        .fetch_all(self.pool)
        .await?;

        Ok(nominations)
    }

    /// Insert a nomination. A second nomination by the same team for the same
    /// game is a `ConstraintViolation`, even when two requests race.
    pub async fn lock(
        &self,
        fixture_id: Uuid,
        team_id: Uuid,
        game_number: i32,
        player_name: &str,
    ) -> Result<PoolNomination> {
        sqlx::query_as::<_, PoolNomination>(
            r#"
            INSERT INTO pool_nominations (fixture_id, team_id, game_number, player_name)
            VALUES ($1, $2, $3, $4)
            RETURNING nomination_id, fixture_id, team_id, game_number, player_name, locked_at
            "#,
        )
        .bind(fixture_id)
        .bind(team_id)
        .bind(game_number)
        .bind(player_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_unique_violation() => StorageError::ConstraintViolation(format!(
                "Nomination for game {} is already locked",
                game_number
            )),
            err => err,
        })
    }
}
