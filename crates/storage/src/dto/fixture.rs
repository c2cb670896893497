use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Sport;

/// Query filters for the fixture list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FixtureFilter {
    pub division_id: Option<Uuid>,
    pub week: Option<i32>,
}

impl FixtureFilter {
    pub fn validate(&self) -> Result<(), String> {
        match self.week {
            Some(week) if week < 1 => Err("week must be >= 1".to_string()),
            _ => Ok(()),
        }
    }
}

/// Fixture with its division, both teams and the recorded result, if any
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FixtureResponse {
    pub fixture_id: Uuid,
    pub week: i32,
    pub scheduled_at: NaiveDateTime,
    pub division: DivisionInfo,
    pub home_team: TeamInfo,
    pub away_team: TeamInfo,
    pub result: Option<ResultInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DivisionInfo {
    pub division_id: Uuid,
    pub name: String,
    pub sport: Sport,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamInfo {
    pub team_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultInfo {
    pub home_score: i32,
    pub away_score: i32,
    pub details: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_rejects_week_zero() {
        let filter = FixtureFilter {
            division_id: None,
            week: Some(0),
        };
        assert!(filter.validate().is_err());
        assert!(FixtureFilter::default().validate().is_ok());
    }
}
