use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::services::points_ledger::MatchScore;

/// The recorded score of a fixture. At most one exists per fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchResult {
    pub result_id: Uuid,
    pub fixture_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub details: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MatchResult {
    pub fn score(&self) -> Result<MatchScore> {
        MatchScore::new(self.home_score, self.away_score)
    }
}
