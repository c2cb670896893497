use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Fixture, FixtureWithResult, MatchResult};
use crate::services::ledger_store::{LedgerStore, LedgerTransaction};
use crate::services::points_ledger::MatchScore;

/// PostgreSQL-backed ledger storage.
///
/// Each ledger transaction locks the fixture row with `FOR UPDATE` before it
/// reads the recorded result, so concurrent writers on the same fixture queue
/// behind one another and always see the result committed before them.
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgLedgerTransaction { tx }))
    }
}

struct PgLedgerTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LedgerTransaction for PgLedgerTransaction {
    async fn lock_fixture(&mut self, fixture_id: Uuid) -> Result<Option<FixtureWithResult>> {
        let fixture = sqlx::query_as::<_, Fixture>(
            r#"
            SELECT fixture_id, division_id, home_team_id, away_team_id, scheduled_at, week
            FROM fixtures
            WHERE fixture_id = $1
            FOR UPDATE
            "#,
        )
        .bind(fixture_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        let Some(fixture) = fixture else {
            return Ok(None);
        };

        let result = sqlx::query_as::<_, MatchResult>(
            r#"
            SELECT result_id, fixture_id, home_score, away_score, details, created_at, updated_at
            FROM results
            WHERE fixture_id = $1
            "#,
        )
        .bind(fixture_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(Some(FixtureWithResult { fixture, result }))
    }

    async fn adjust_team_points(&mut self, team_id: Uuid, delta: i32) -> Result<()> {
        let updated = sqlx::query("UPDATE teams SET points = points + $2 WHERE team_id = $1")
            .bind(team_id)
            .bind(delta)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| match StorageError::from(e) {
                err if err.is_out_of_range() => {
                    StorageError::ConstraintViolation("team points are out of range".to_string())
                }
                err => err.into_constraint_violation("team points cannot go below zero"),
            })?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn upsert_result(
        &mut self,
        fixture_id: Uuid,
        score: MatchScore,
        details: Option<&str>,
    ) -> Result<MatchResult> {
        let result = sqlx::query_as::<_, MatchResult>(
            r#"
            INSERT INTO results (fixture_id, home_score, away_score, details)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (fixture_id)
            DO UPDATE SET
                home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                details = EXCLUDED.details,
                updated_at = CURRENT_TIMESTAMP
            RETURNING result_id, fixture_id, home_score, away_score, details, created_at, updated_at
            "#,
        )
        .bind(fixture_id)
        .bind(score.home())
        .bind(score.away())
        .bind(details)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(result)
    }

    async fn delete_result(&mut self, fixture_id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM results WHERE fixture_id = $1")
            .bind(fixture_id)
            .execute(&mut *self.tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
