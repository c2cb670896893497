use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::MatchResult;

/// A scheduled match between two teams of the same division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fixture {
    pub fixture_id: Uuid,
    pub division_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub scheduled_at: NaiveDateTime,
    pub week: i32,
}

/// A fixture together with whatever result is currently recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureWithResult {
    pub fixture: Fixture,
    pub result: Option<MatchResult>,
}
