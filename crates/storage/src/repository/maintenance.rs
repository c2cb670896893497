//! Bulk administrative writes that bypass the points ledger.
//!
//! These zero every team's total in the same transaction that removes the
//! results (or fixtures) the totals were built from, so the ledger invariant
//! holds again once they commit. Every fixture row is locked first, which
//! makes them wait for in-flight ledger transactions and vice versa.

use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::account::ResetPointsResponse;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFixturesSummary {
    pub fixtures_deleted: u64,
    pub teams_updated: u64,
}

pub struct MaintenanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MaintenanceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Zero all team points and delete every recorded result
    pub async fn reset_points(&self) -> Result<ResetPointsResponse> {
        let mut tx = self.pool.begin().await?;
        lock_all_fixtures(&mut tx).await?;

        let teams_updated = sqlx::query("UPDATE teams SET points = 0")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let results_deleted = sqlx::query("DELETE FROM results")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::warn!(teams_updated, results_deleted, "League points reset");

        Ok(ResetPointsResponse {
            teams_updated,
            results_deleted,
        })
    }

    /// Delete the whole fixture list (results cascade) and zero all points
    pub async fn clear_fixtures(&self) -> Result<ClearFixturesSummary> {
        let mut tx = self.pool.begin().await?;
        lock_all_fixtures(&mut tx).await?;

        let teams_updated = sqlx::query("UPDATE teams SET points = 0")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let fixtures_deleted = sqlx::query("DELETE FROM fixtures")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::warn!(fixtures_deleted, teams_updated, "Fixture list cleared");

        Ok(ClearFixturesSummary {
            fixtures_deleted,
            teams_updated,
        })
    }
}

async fn lock_all_fixtures(tx: &mut Transaction<'_, Postgres>) -> Result<()> {
    sqlx::query("SELECT fixture_id FROM fixtures FOR UPDATE")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ledger::PgLedgerStore, seed};
    use crate::services::{
        permissions::Actor,
        points_ledger::{MatchScore, PointsLedger},
    };
    use uuid::Uuid;

    async fn played_fixture(pool: &PgPool) -> seed::SeededFixture {
        let seeded = seed::fixture(pool).await;
        let grant = Actor::SuperAdmin {
            admin_id: Uuid::new_v4(),
        }
        .grant_for(&seeded.division)
        .unwrap();
        PointsLedger::new(PgLedgerStore::new(pool.clone()))
            .submit_result(&grant, seeded.fixture_id, MatchScore::new(4, 2).unwrap(), None)
            .await
            .unwrap();
        seeded
    }

    #[sqlx::test]
    async fn test_reset_points_leaves_no_results_and_no_points(pool: PgPool) {
        let seeded = played_fixture(&pool).await;
        assert_eq!(seeded.points(&pool).await, (6, 2));

        let summary = MaintenanceRepository::new(&pool).reset_points().await.unwrap();

        assert_eq!(summary.teams_updated, 2);
        assert_eq!(summary.results_deleted, 1);
        assert_eq!(seeded.points(&pool).await, (0, 0));
        assert_eq!(seed::result_count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_clear_fixtures_removes_fixtures_and_results(pool: PgPool) {
        let seeded = played_fixture(&pool).await;

        let summary = MaintenanceRepository::new(&pool)
            .clear_fixtures()
            .await
            .unwrap();

        let fixtures: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fixtures")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(summary.fixtures_deleted, 1);
        assert_eq!(fixtures, 0);
        assert_eq!(seed::result_count(&pool).await, 0);
        assert_eq!(seeded.points(&pool).await, (0, 0));
    }
}
