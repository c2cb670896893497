use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::MatchResult;
use crate::services::points_ledger::{Allocation, ClearOutcome, PointsDelta, SubmittedResult};

/// Request payload for submitting or correcting a fixture result
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitResultRequest {
    #[validate(range(min = 0, max = 1000, message = "Home score must be between 0 and 1000"))]
    pub home_score: i32,

    #[validate(range(min = 0, max = 1000, message = "Away score must be between 0 and 1000"))]
    pub away_score: i32,

    #[validate(length(max = 2000, message = "Details must be at most 2000 characters"))]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitResultResponse {
    pub result: MatchResult,
    /// Points this fixture now contributes to each team
    pub allocation: Allocation,
    /// Change applied to the team totals by this submission
    pub delta: PointsDelta,
    pub corrected: bool,
}

impl From<SubmittedResult> for SubmitResultResponse {
    fn from(submitted: SubmittedResult) -> Self {
        Self {
            corrected: submitted.previous.is_some(),
            result: submitted.result,
            allocation: submitted.allocation,
            delta: submitted.delta,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearResultResponse {
    pub cleared: bool,
    pub reversed: Option<PointsDelta>,
}

impl From<ClearOutcome> for ClearResultResponse {
    fn from(outcome: ClearOutcome) -> Self {
        match outcome {
            ClearOutcome::Cleared { reversed, .. } => Self {
                cleared: true,
                reversed: Some(reversed),
            },
            ClearOutcome::NothingToClear => Self {
                cleared: false,
                reversed: None,
            },
        }
    }
}
