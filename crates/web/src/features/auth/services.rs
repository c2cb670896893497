use sqlx::PgPool;
use storage::{
    error::{Result, StorageError},
    repository::account::AccountRepository,
    services::{
        credentials::{check_password, hash_password},
        permissions::Actor,
    },
};

/// Checks an email and password against admins first, then captains.
///
/// Returns `None` for an unknown email or a wrong password alike. An unknown
/// email still pays for one password hash.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<Option<Actor>> {
    let repo = AccountRepository::new(pool);

    if let Some(admin) = repo.find_admin_by_email(email).await? {
        let valid = password_matches(password, Some(admin.password_hash.clone())).await?;
        return Ok(valid.then(|| Actor::from_admin(&admin)));
    }

    let captain = repo.find_captain_by_email(email).await?;
    let stored_hash = captain.as_ref().map(|c| c.password_hash.clone());
    if !password_matches(password, stored_hash).await? {
        return Ok(None);
    }

    match captain {
        Some(captain) => repo.captain_actor(&captain).await.map(Some),
        None => Ok(None),
    }
}

/// Argon2 on the blocking pool
pub async fn hash_password_blocking(password: &str) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| StorageError::Credentials(format!("password hashing task failed: {}", e)))?
}

async fn password_matches(password: &str, stored_hash: Option<String>) -> Result<bool> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || check_password(&password, stored_hash.as_deref()))
        .await
        .map_err(|e| StorageError::Credentials(format!("password check task failed: {}", e)))
}
