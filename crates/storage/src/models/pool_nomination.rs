use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Sport;

/// A player named by one team for one game of a Women's+ Pool fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PoolNomination {
    pub nomination_id: Uuid,
    pub fixture_id: Uuid,
    pub team_id: Uuid,
    pub game_number: i32,
    pub player_name: String,
    pub locked_at: NaiveDateTime,
}

/// The parts of a fixture the nomination rules look at.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NominationFixture {
    pub fixture_id: Uuid,
    pub division_name: String,
    #[sqlx(try_from = "String")]
    pub sport: Sport,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}
