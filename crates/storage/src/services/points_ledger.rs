//! Points ledger.
//!
//! Team point totals are a materialized sum over recorded results. This module
//! is the only code path that changes them one fixture at a time: a submission
//! applies the difference between the new allocation and the allocation of the
//! result it replaces, and a clear subtracts the recorded allocation. Both run
//! inside a single [`LedgerTransaction`] that holds the fixture lock.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Fixture, MatchResult};
use crate::services::ledger_store::{LedgerStore, LedgerTransaction};
use crate::services::permissions::DivisionGrant;

/// Bonus awarded to the strict winner of a fixture on top of games won.
pub const WIN_BONUS: i32 = 2;

/// Upper bound on games or frames won by one side in a fixture.
pub const MAX_SCORE: i32 = 1000;

/// A validated final score: games or frames won by each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchScore {
    home: i32,
    away: i32,
}

impl MatchScore {
    pub fn new(home: i32, away: i32) -> Result<Self> {
        if home < 0 || away < 0 {
            return Err(StorageError::InvalidArgument(format!(
                "scores must be non-negative, got {}-{}",
                home, away
            )));
        }
        if home.max(away) > MAX_SCORE {
            return Err(StorageError::InvalidArgument(format!(
                "score {}-{} is out of range, at most {} per side",
                home, away, MAX_SCORE
            )));
        }

        Ok(Self { home, away })
    }

    pub fn home(&self) -> i32 {
        self.home
    }

    pub fn away(&self) -> i32 {
        self.away
    }
}

/// Points a fixture contributes to each side's total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Allocation {
    pub home: i32,
    pub away: i32,
}

impl Allocation {
    pub fn delta_from(&self, previous: &Allocation) -> PointsDelta {
        PointsDelta {
            home: self.home - previous.home,
            away: self.away - previous.away,
        }
    }

    pub fn reversal(&self) -> PointsDelta {
        PointsDelta {
            home: -self.home,
            away: -self.away,
        }
    }
}

/// Signed change applied to the two teams of a fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PointsDelta {
    pub home: i32,
    pub away: i32,
}

impl PointsDelta {
    pub fn is_zero(&self) -> bool {
        self.home == 0 && self.away == 0
    }
}

/// Games won count one point each; the strict winner earns [`WIN_BONUS`] on
/// top. A draw earns no bonus.
pub fn score_to_points(score: MatchScore) -> Allocation {
    let MatchScore { home, away } = score;

    match home.cmp(&away) {
        Ordering::Greater => Allocation {
            home: home + WIN_BONUS,
            away,
        },
        Ordering::Less => Allocation {
            home,
            away: away + WIN_BONUS,
        },
        Ordering::Equal => Allocation { home, away },
    }
}

fn recorded_allocation(result: Option<&MatchResult>) -> Result<Allocation> {
    match result {
        Some(result) => Ok(score_to_points(result.score()?)),
        None => Ok(Allocation::default()),
    }
}

/// Outcome of a submission or correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedResult {
    pub result: MatchResult,
    pub previous: Option<MatchResult>,
    pub allocation: Allocation,
    pub delta: PointsDelta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared {
        result: MatchResult,
        reversed: PointsDelta,
    },
    NothingToClear,
}

pub struct PointsLedger<S> {
    store: S,
}

impl<S: LedgerStore> PointsLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records or corrects the result of a fixture.
    ///
    /// Resubmitting an unchanged score is a no-op on team points, so callers
    /// may retry freely.
    pub async fn submit_result(
        &self,
        grant: &DivisionGrant,
        fixture_id: Uuid,
        score: MatchScore,
        details: Option<String>,
    ) -> Result<SubmittedResult> {
        let details = normalize_details(details);

        let mut tx = self.store.begin().await?;
        let current = tx
            .lock_fixture(fixture_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        grant.covers(current.fixture.division_id)?;

        let previous = recorded_allocation(current.result.as_ref())?;
        let allocation = score_to_points(score);
        let delta = allocation.delta_from(&previous);

        apply_delta(tx.as_mut(), &current.fixture, delta).await?;
        let result = tx
            .upsert_result(fixture_id, score, details.as_deref())
            .await?;
        tx.commit().await?;

        tracing::info!(
            %fixture_id,
            division_id = %grant.division_id(),
            home_score = score.home(),
            away_score = score.away(),
            delta_home = delta.home,
            delta_away = delta.away,
            corrected = current.result.is_some(),
            "Result recorded"
        );

        Ok(SubmittedResult {
            result,
            previous: current.result,
            allocation,
            delta,
        })
    }

    /// Removes a fixture's result and takes its points back off both teams.
    /// Clearing a fixture that has no result succeeds without touching points.
    pub async fn clear_result(
        &self,
        grant: &DivisionGrant,
        fixture_id: Uuid,
    ) -> Result<ClearOutcome> {
        let mut tx = self.store.begin().await?;
        let current = tx
            .lock_fixture(fixture_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        grant.covers(current.fixture.division_id)?;

        let Some(result) = current.result else {
            tracing::debug!(%fixture_id, "No result to clear");
            return Ok(ClearOutcome::NothingToClear);
        };

        let reversed = recorded_allocation(Some(&result))?.reversal();
        apply_delta(tx.as_mut(), &current.fixture, reversed).await?;
        tx.delete_result(fixture_id).await?;
        tx.commit().await?;

        tracing::info!(
            %fixture_id,
            delta_home = reversed.home,
            delta_away = reversed.away,
            "Result cleared"
        );

        Ok(ClearOutcome::Cleared { result, reversed })
    }
}

async fn apply_delta(
    tx: &mut dyn LedgerTransaction,
    fixture: &Fixture,
    delta: PointsDelta,
) -> Result<()> {
    if delta.is_zero() {
        tracing::debug!(fixture_id = %fixture.fixture_id, "Points unchanged");
        return Ok(());
    }
    if delta.home != 0 {
        tx.adjust_team_points(fixture.home_team_id, delta.home)
            .await?;
    }
    if delta.away != 0 {
        tx.adjust_team_points(fixture.away_team_id, delta.away)
            .await?;
    }
    Ok(())
}

fn normalize_details(details: Option<String>) -> Option<String> {
    details
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
