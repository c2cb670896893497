use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Credential error: {0}")]
    Credentials(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23514")
        )
    }

    /// Integer arithmetic overflowed a column type.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("22003")
        )
    }

    /// Rewrites constraint failures reported by Postgres into a
    /// `ConstraintViolation` carrying a caller-facing message. Other errors pass
    /// through untouched.
    pub fn into_constraint_violation(self, message: impl Into<String>) -> Self {
        if self.is_unique_violation() || self.is_foreign_key_violation() || self.is_check_violation()
        {
            StorageError::ConstraintViolation(message.into())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_pass_through_constraint_mapping() {
        let err = StorageError::NotFound.into_constraint_violation("duplicate");
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn test_row_not_found_is_not_a_constraint_violation() {
        let err = StorageError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_check_violation());
        assert!(!err.is_out_of_range());
        assert!(matches!(
            err.into_constraint_violation("duplicate"),
            StorageError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
