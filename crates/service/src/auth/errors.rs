use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for the login workflow
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately indistinguishable.
    #[error("Invalid username or password")]
    Unauthorized,
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 1004,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        AuthError::Repository(e.to_string())
    }
}
