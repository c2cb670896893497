//! Storage contract consumed by the points ledger.
//!
//! A `LedgerTransaction` is one atomic unit of work: nothing it writes is
//! visible until `commit`, and dropping it without committing discards every
//! write.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{FixtureWithResult, MatchResult};
use crate::services::points_ledger::MatchScore;

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>>;
}

#[async_trait]
pub trait LedgerTransaction: Send {
    /// Reads a fixture and its current result, holding a lock on the fixture
    /// until the transaction ends. Two transactions locking the same fixture
    /// run one after the other.
    async fn lock_fixture(&mut self, fixture_id: Uuid) -> Result<Option<FixtureWithResult>>;

    /// Adds a signed amount to a team's running points total.
    async fn adjust_team_points(&mut self, team_id: Uuid, delta: i32) -> Result<()>;

    async fn upsert_result(
        &mut self,
        fixture_id: Uuid,
        score: MatchScore,
        details: Option<&str>,
    ) -> Result<MatchResult>;

    async fn delete_result(&mut self, fixture_id: Uuid) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
