use sqlx::PgPool;
use storage::{
    dto::account::{CreateAdminRequest, CreateCaptainRequest, ResetPointsResponse},
    error::{Result, StorageError},
    models::{Admin, AdminType, Captain},
    repository::{account::AccountRepository, maintenance::MaintenanceRepository},
    services::permissions::{Actor, Principal},
};
use uuid::Uuid;

use crate::features::auth::services::hash_password_blocking;

/// Zero every team's points and delete all results
pub async fn reset_points(pool: &PgPool, actor: &Actor) -> Result<ResetPointsResponse> {
    actor.require_super_admin()?;

    tracing::info!(principal = ?actor.principal(), "Points reset requested");
    MaintenanceRepository::new(pool).reset_points().await
}

pub async fn list_admins(pool: &PgPool, actor: &Actor) -> Result<Vec<Admin>> {
    actor.require_super_admin()?;
    AccountRepository::new(pool).list_admins().await
}

/// Create a general admin
pub async fn create_admin(pool: &PgPool, actor: &Actor, req: &CreateAdminRequest) -> Result<Admin> {
    actor.require_super_admin()?;

    let password_hash = hash_password_blocking(&req.password).await?;
    let admin = AccountRepository::new(pool)
        .create_admin(
            req.email.trim(),
            &password_hash,
            req.full_name.as_deref(),
            AdminType::General,
        )
        .await?;
    tracing::info!(admin_id = %admin.admin_id, "Admin account created");

    Ok(admin)
}

pub async fn delete_admin(pool: &PgPool, actor: &Actor, admin_id: Uuid) -> Result<()> {
    actor.require_super_admin()?;

    if actor.principal() == Principal::Admin(admin_id) {
        return Err(StorageError::InvalidArgument(
            "You cannot delete your own account".to_string(),
        ));
    }

    AccountRepository::new(pool).delete_admin(admin_id).await?;
    tracing::info!(%admin_id, "Admin account deleted");

    Ok(())
}

pub async fn list_captains(pool: &PgPool, actor: &Actor) -> Result<Vec<Captain>> {
    actor.require_super_admin()?;
    AccountRepository::new(pool).list_captains().await
}

pub async fn create_captain(
    pool: &PgPool,
    actor: &Actor,
    req: &CreateCaptainRequest,
) -> Result<Captain> {
    actor.require_super_admin()?;

    let password_hash = hash_password_blocking(&req.password).await?;
    let captain = AccountRepository::new(pool)
        .create_captain(
            req.email.trim(),
            &password_hash,
            req.full_name.as_deref(),
            req.team_id,
            req.role,
        )
        .await?;
    tracing::info!(captain_id = %captain.captain_id, role = captain.role.as_str(), "Captain account created");

    Ok(captain)
}

pub async fn delete_captain(pool: &PgPool, actor: &Actor, captain_id: Uuid) -> Result<()> {
    actor.require_super_admin()?;

    AccountRepository::new(pool).delete_captain(captain_id).await?;
    tracing::info!(%captain_id, "Captain account deleted");

    Ok(())
}
