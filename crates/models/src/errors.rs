use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate value: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a driver error, surfacing unique-constraint violations as [`ModelError::Duplicate`].
    pub fn from_db(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => ModelError::Duplicate(detail),
            _ => ModelError::Db(err.to_string()),
        }
    }
}
