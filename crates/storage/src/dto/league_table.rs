use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Sport;

/// Points table for one division
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeagueTableResponse {
    pub division_id: Uuid,
    pub name: String,
    pub sport: Sport,
    pub standings: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StandingEntry {
    pub position: u32,
    pub team_id: Uuid,
    pub name: String,
    pub points: i32,
    pub played: i64,
}
