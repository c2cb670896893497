//! In-memory [`LedgerStore`] for tests.
//!
//! A transaction holds the whole-store lock and works on a private copy that
//! replaces the shared state on commit, so transactions are serializable and
//! dropping one uncommitted discards its writes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Fixture, FixtureWithResult, MatchResult, Team};
use crate::services::ledger_store::{LedgerStore, LedgerTransaction};
use crate::services::points_ledger::MatchScore;

#[derive(Debug, Clone, Default)]
struct LeagueState {
    teams: HashMap<Uuid, Team>,
    fixtures: HashMap<Uuid, Fixture>,
    results: HashMap<Uuid, MatchResult>,
}

#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    state: Arc<Mutex<LeagueState>>,
    fail_result_writes: Arc<AtomicBool>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_team(&self, division_id: Uuid, name: &str) -> Team {
        let team = Team {
            team_id: Uuid::new_v4(),
            division_id,
            name: name.to_string(),
            points: 0,
        };
        self.state
            .lock()
            .await
            .teams
            .insert(team.team_id, team.clone());
        team
    }

    pub async fn insert_fixture(
        &self,
        division_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> Fixture {
        let fixture = Fixture {
            fixture_id: Uuid::new_v4(),
            division_id,
            home_team_id,
            away_team_id,
            scheduled_at: Utc::now().naive_utc(),
            week: 1,
        };
        self.state
            .lock()
            .await
            .fixtures
            .insert(fixture.fixture_id, fixture.clone());
        fixture
    }

    pub async fn team_points(&self, team_id: Uuid) -> Option<i32> {
        self.state
            .lock()
            .await
            .teams
            .get(&team_id)
            .map(|team| team.points)
    }

    pub async fn result_for(&self, fixture_id: Uuid) -> Option<MatchResult> {
        self.state.lock().await.results.get(&fixture_id).cloned()
    }

    /// Makes every subsequent result upsert or delete fail, simulating a
    /// storage error partway through a transaction.
    pub fn fail_result_writes(&self, fail: bool) {
        self.fail_result_writes.store(fail, Ordering::SeqCst);
    }

    fn injected_failure(&self) -> Option<StorageError> {
        self.fail_result_writes
            .load(Ordering::SeqCst)
            .then(|| StorageError::Database(sqlx::Error::PoolClosed))
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            guard,
            working,
        }))
    }
}

struct MemoryTransaction {
    store: MemoryLedgerStore,
    guard: OwnedMutexGuard<LeagueState>,
    working: LeagueState,
}

#[async_trait]
impl LedgerTransaction for MemoryTransaction {
    async fn lock_fixture(&mut self, fixture_id: Uuid) -> Result<Option<FixtureWithResult>> {
        Ok(self
            .working
            .fixtures
            .get(&fixture_id)
            .map(|fixture| FixtureWithResult {
                fixture: fixture.clone(),
                result: self.working.results.get(&fixture_id).cloned(),
            }))
    }

    async fn adjust_team_points(&mut self, team_id: Uuid, delta: i32) -> Result<()> {
        let team = self
            .working
            .teams
            .get_mut(&team_id)
            .ok_or(StorageError::NotFound)?;

        match team.points.checked_add(delta) {
            Some(points) if points >= 0 => {
                team.points = points;
                Ok(())
            }
            Some(_) => Err(StorageError::ConstraintViolation(format!(
                "points for team '{}' cannot go below zero",
                team.name
            ))),
            None => Err(StorageError::ConstraintViolation(format!(
                "points for team '{}' are out of range",
                team.name
            ))),
        }
    }

    async fn upsert_result(
        &mut self,
        fixture_id: Uuid,
        score: MatchScore,
        details: Option<&str>,
    ) -> Result<MatchResult> {
        if let Some(err) = self.store.injected_failure() {
            return Err(err);
        }

        let now = Utc::now().naive_utc();
        let result = match self.working.results.get(&fixture_id) {
            Some(existing) => MatchResult {
                home_score: score.home(),
                away_score: score.away(),
                details: details.map(str::to_string),
                updated_at: now,
                ..existing.clone()
            },
            None => MatchResult {
                result_id: Uuid::new_v4(),
                fixture_id,
                home_score: score.home(),
                away_score: score.away(),
                details: details.map(str::to_string),
                created_at: now,
                updated_at: now,
            },
        };
        self.working.results.insert(fixture_id, result.clone());

        Ok(result)
    }

    async fn delete_result(&mut self, fixture_id: Uuid) -> Result<()> {
        if let Some(err) = self.store.injected_failure() {
            return Err(err);
        }

        self.working
            .results
            .remove(&fixture_id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uncommitted_writes_are_discarded() {
        let store = MemoryLedgerStore::new();
        let team = store.insert_team(Uuid::new_v4(), "Fylde").await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.adjust_team_points(team.team_id, 7).await.unwrap();
        }

        assert_eq!(store.team_points(team.team_id).await, Some(0));
    }

    #[tokio::test]
    async fn test_committed_writes_are_visible() {
        let store = MemoryLedgerStore::new();
        let team = store.insert_team(Uuid::new_v4(), "Bowland").await;

        let mut tx = store.begin().await.unwrap();
        tx.adjust_team_points(team.team_id, 7).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.team_points(team.team_id).await, Some(7));
    }

    #[tokio::test]
    async fn test_points_cannot_drift_negative() {
        let store = MemoryLedgerStore::new();
        let team = store.insert_team(Uuid::new_v4(), "County").await;

        let mut tx = store.begin().await.unwrap();
        let outcome = tx.adjust_team_points(team.team_id, -1).await;

        assert!(matches!(outcome, Err(StorageError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_points_overflow_is_reported_as_out_of_range() {
        let store = MemoryLedgerStore::new();
        let team = store.insert_team(Uuid::new_v4(), "Grizedale").await;

        let mut tx = store.begin().await.unwrap();
        tx.adjust_team_points(team.team_id, i32::MAX).await.unwrap();
        let outcome = tx.adjust_team_points(team.team_id, 1).await;

        match outcome {
            Err(StorageError::ConstraintViolation(msg)) => assert!(msg.contains("out of range")),
            other => panic!("expected out-of-range violation, got {:?}", other),
        }
    }
}
