use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A college side competing in one division.
///
/// `points` is a running total maintained by the points ledger; it always
/// equals the allocation implied by the results currently recorded against
/// this team's fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub division_id: Uuid,
    pub name: String,
    pub points: i32,
}
