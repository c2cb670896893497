use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::CaptainRole;
use crate::services::permissions::Actor;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The authenticated account behind the current session
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub actor: Actor,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCaptainRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 255))]
    pub full_name: Option<String>,

    pub team_id: Uuid,

    #[serde(default = "default_role")]
    pub role: CaptainRole,
}

fn default_role() -> CaptainRole {
    CaptainRole::Captain
}

/// Counts reported by the administrative points reset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetPointsResponse {
    pub teams_updated: u64,
    pub results_deleted: u64,
}
