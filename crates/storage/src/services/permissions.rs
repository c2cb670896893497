//! Division-scoped write permissions.
//!
//! Result writes require a [`DivisionGrant`], and the only way to obtain one is
//! [`Actor::grant_for`]. The points ledger re-checks the grant against the
//! fixture it locks, so a grant for one division cannot be replayed against
//! another.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Admin, AdminType, Captain, CaptainRole, Division, Sport};

/// Who a session belongs to, as stored in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Principal {
    Admin(Uuid),
    Captain(Uuid),
}

/// An authenticated account resolved to its permission scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    SuperAdmin { admin_id: Uuid },
    GeneralAdmin { admin_id: Uuid },
    PoolCoordinator { captain_id: Uuid },
    DartsCoordinator { captain_id: Uuid },
    Captain { captain_id: Uuid, division_id: Uuid },
}

impl Actor {
    pub fn from_admin(admin: &Admin) -> Self {
        match admin.admin_type {
            AdminType::Super => Self::SuperAdmin {
                admin_id: admin.admin_id,
            },
            AdminType::General => Self::GeneralAdmin {
                admin_id: admin.admin_id,
            },
        }
    }

    /// `team_division_id` is the division of the captain's own team.
    pub fn from_captain(captain: &Captain, team_division_id: Uuid) -> Self {
        match captain.role {
            CaptainRole::Cpc => Self::PoolCoordinator {
                captain_id: captain.captain_id,
            },
            CaptainRole::Cdc => Self::DartsCoordinator {
                captain_id: captain.captain_id,
            },
            CaptainRole::Captain => Self::Captain {
                captain_id: captain.captain_id,
                division_id: team_division_id,
            },
        }
    }

    pub fn principal(&self) -> Principal {
        match *self {
            Self::SuperAdmin { admin_id } | Self::GeneralAdmin { admin_id } => {
                Principal::Admin(admin_id)
            }
            Self::PoolCoordinator { captain_id }
            | Self::DartsCoordinator { captain_id }
            | Self::Captain { captain_id, .. } => Principal::Captain(captain_id),
        }
    }

    pub fn can_write(&self, division: &Division) -> bool {
        match self {
            Self::SuperAdmin { .. } | Self::GeneralAdmin { .. } => true,
            // Coordinators also run dominoes
            Self::PoolCoordinator { .. } => matches!(division.sport, Sport::Pool | Sport::Dominoes),
            Self::DartsCoordinator { .. } => {
                matches!(division.sport, Sport::Darts | Sport::Dominoes)
            }
            Self::Captain { division_id, .. } => *division_id == division.division_id,
        }
    }

    pub fn grant_for(&self, division: &Division) -> Result<DivisionGrant> {
        if self.can_write(division) {
            Ok(DivisionGrant {
                division_id: division.division_id,
            })
        } else {
            tracing::warn!(
                actor = ?self.principal(),
                division = %division.name,
                "Write denied outside actor's divisions"
            );
            Err(StorageError::Forbidden(format!(
                "no permission for division '{}'",
                division.name
            )))
        }
    }

    pub fn require_super_admin(&self) -> Result<()> {
        match self {
            Self::SuperAdmin { .. } => Ok(()),
            _ => Err(StorageError::Forbidden(
                "super admin access required".to_string(),
            )),
        }
    }
}

/// Proof that a permission check passed for one division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionGrant {
    division_id: Uuid,
}

impl DivisionGrant {
    pub fn division_id(&self) -> Uuid {
        self.division_id
    }

    pub fn covers(&self, division_id: Uuid) -> Result<()> {
        if self.division_id == division_id {
            Ok(())
        } else {
            Err(StorageError::Forbidden(
                "fixture is outside the granted division".to_string(),
            ))
        }
    }
}
