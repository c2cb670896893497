use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::UnknownVariant;

/// League-wide administrator account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub admin_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub admin_type: AdminType,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminType {
    Super,
    General,
}

impl AdminType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Super => "super",
            Self::General => "general",
        }
    }
}

impl TryFrom<String> for AdminType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "super" => Ok(Self::Super),
            "general" => Ok(Self::General),
            _ => Err(UnknownVariant::new("admin type", value)),
        }
    }
}

/// Team captain account. Some captains also coordinate a sport across
/// every college.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Captain {
    pub captain_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub team_id: Uuid,
    #[sqlx(try_from = "String")]
    pub role: CaptainRole,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaptainRole {
    Captain,
    /// College pool coordinator
    Cpc,
    /// College darts coordinator
    Cdc,
}

impl CaptainRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Captain => "captain",
            Self::Cpc => "cpc",
            Self::Cdc => "cdc",
        }
    }
}

impl TryFrom<String> for CaptainRole {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "captain" => Ok(Self::Captain),
            "cpc" => Ok(Self::Cpc),
            "cdc" => Ok(Self::Cdc),
            _ => Err(UnknownVariant::new("captain role", value)),
        }
    }
}
