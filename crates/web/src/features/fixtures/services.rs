use sqlx::PgPool;
use storage::{
    dto::{
        fixture::{FixtureFilter, FixtureResponse},
        result::SubmitResultRequest,
    },
    error::Result,
    repository::{fixture::FixtureRepository, ledger::PgLedgerStore},
    services::{
        permissions::Actor,
        points_ledger::{ClearOutcome, MatchScore, PointsLedger, SubmittedResult},
    },
};
use uuid::Uuid;

/// List fixtures, optionally narrowed to one division or week
pub async fn list_fixtures(pool: &PgPool, filter: &FixtureFilter) -> Result<Vec<FixtureResponse>> {
    let repo = FixtureRepository::new(pool);
    repo.list(filter).await
}

/// Get a fixture with its teams and result
pub async fn get_fixture(pool: &PgPool, fixture_id: Uuid) -> Result<FixtureResponse> {
    let repo = FixtureRepository::new(pool);
    repo.find_detailed(fixture_id).await
}

/// Check the actor may write to the fixture's division, then record the result
pub async fn submit_result(
    pool: &PgPool,
    actor: &Actor,
    fixture_id: Uuid,
    req: SubmitResultRequest,
) -> Result<SubmittedResult> {
    let division = FixtureRepository::new(pool).find_division(fixture_id).await?;
    let grant = actor.grant_for(&division)?;
    let score = MatchScore::new(req.home_score, req.away_score)?;

    ledger(pool)
        .submit_result(&grant, fixture_id, score, req.details)
        .await
}

/// Check the actor may write to the fixture's division, then clear its result
pub async fn clear_result(pool: &PgPool, actor: &Actor, fixture_id: Uuid) -> Result<ClearOutcome> {
    let division = FixtureRepository::new(pool).find_division(fixture_id).await?;
    let grant = actor.grant_for(&division)?;

    ledger(pool).clear_result(&grant, fixture_id).await
}

fn ledger(pool: &PgPool) -> PointsLedger<PgLedgerStore> {
    PointsLedger::new(PgLedgerStore::new(pool.clone()))
}
