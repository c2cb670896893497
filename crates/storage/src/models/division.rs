use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// A competitive grouping such as "Open Darts" or "Women's+ Pool".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Division {
    pub division_id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub sport: Sport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Darts,
    Pool,
    Dominoes,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darts => "darts",
            Self::Pool => "pool",
            Self::Dominoes => "dominoes",
        }
    }
}

impl TryFrom<String> for Sport {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "darts" => Ok(Self::Darts),
            "pool" => Ok(Self::Pool),
            "dominoes" | "domino" => Ok(Self::Dominoes),
            _ => Err(UnknownVariant::new("sport", value)),
        }
    }
}

/// Raised when a text column holds a value outside its enumeration.
#[derive(Debug, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
