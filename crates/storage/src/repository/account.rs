use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Admin, AdminType, Captain, CaptainRole};
use crate::services::permissions::{Actor, Principal};

pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email, ignoring case
    pub async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT admin_id, email, password_hash, full_name, admin_type, created_at
            FROM admins
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(admin)
    }

    /// Find a captain by email, ignoring case
    pub async fn find_captain_by_email(&self, email: &str) -> Result<Option<Captain>> {
        let captain = sqlx::query_as::<_, Captain>(
            r#"
            SELECT captain_id, email, password_hash, full_name, team_id, role, created_at
            FROM captains
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(captain)
    }

    /// Resolves a session principal to its current permission scope. Returns
    /// `NotFound` when the account has since been deleted.
    pub async fn find_actor(&self, principal: &Principal) -> Result<Actor> {
        match *principal {
            Principal::Admin(admin_id) => {
                let admin = sqlx::query_as::<_, Admin>(
                    r#"
                    SELECT admin_id, email, password_hash, full_name, admin_type, created_at
                    FROM admins
                    WHERE admin_id = $1
                    "#,
                )
                .bind(admin_id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

                Ok(Actor::from_admin(&admin))
            }
            Principal::Captain(captain_id) => {
                let captain = sqlx::query_as::<_, Captain>(
                    r#"
                    SELECT captain_id, email, password_hash, full_name, team_id, role, created_at
                    FROM captains
                    WHERE captain_id = $1
                    "#,
                )
                .bind(captain_id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

                self.captain_actor(&captain).await
            }
        }
    }

    /// Build a captain's actor from their team's division
    pub async fn captain_actor(&self, captain: &Captain) -> Result<Actor> {
        let division_id: Uuid =
            sqlx::query_scalar::<_, Uuid>("SELECT division_id FROM teams WHERE team_id = $1")
                .bind(captain.team_id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

        Ok(Actor::from_captain(captain, division_id))
    }

    /// List all admin accounts by email
    pub async fn list_admins(&self) -> Result<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(
            r#"
            SELECT admin_id, email, password_hash, full_name, admin_type, created_at
            FROM admins
            ORDER BY email
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(admins)
    }

    /// List all captain accounts by email
    pub async fn list_captains(&self) -> Result<Vec<Captain>> {
        let captains = sqlx::query_as::<_, Captain>(
            r#"
            SELECT captain_id, email, password_hash, full_name, team_id, role, created_at
            FROM captains
            ORDER BY email
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(captains)
    }

    /// Create an admin; a taken email is a `ConstraintViolation`
    pub async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        admin_type: AdminType,
    ) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (email, password_hash, full_name, admin_type)
            VALUES ($1, $2, $3, $4)
            RETURNING admin_id, email, password_hash, full_name, admin_type, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(admin_type.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint_violation("Email already exists"))?;

        Ok(admin)
    }

    /// Create a captain for an existing team
    pub async fn create_captain(
        &self,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        team_id: Uuid,
        role: CaptainRole,
    ) -> Result<Captain> {
        let captain = sqlx::query_as::<_, Captain>(
            r#"
            INSERT INTO captains (email, password_hash, full_name, team_id, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING captain_id, email, password_hash, full_name, team_id, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .bind(team_id)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation(format!("Team {} does not exist", team_id))
            } else {
                err.into_constraint_violation("Email already exists")
            }
        })?;

        Ok(captain)
    }

    /// Delete an admin account
    pub async fn delete_admin(&self, admin_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM admins WHERE admin_id = $1")
            .bind(admin_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Delete a captain account
    pub async fn delete_captain(&self, captain_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM captains WHERE captain_id = $1")
            .bind(captain_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
