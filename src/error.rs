use thiserror::Error;

/// Error surface of the service layer. Repositories keep returning
/// `anyhow::Result`, `map_db_err` lifts their failures into this taxonomy at
/// the service boundary.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("password hash error: {0}")]
    Hash(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Unique and foreign key violations come back from Postgres as plain
/// `sqlx::Error`s, callers need to tell them apart from infrastructure
/// failures.
pub fn map_db_err(err: anyhow::Error) -> AccountError {
    if let Some(sqlx_err) = err.downcast_ref::<sqlx::Error>() {
        if let Some(db_err) = sqlx_err.as_database_error() {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return AccountError::Constraint(db_err.to_string());
            }
        }
    }
    AccountError::Database(err)
}
