use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} not found with id: {}", entity, id)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Duplicate(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        assert_eq!(ServiceError::not_found("Student", 42).to_string(), "Student not found with id: 42");
    }

    #[test]
    fn model_errors_map_by_kind() {
        assert!(matches!(ServiceError::from(ModelError::Validation("x".into())), ServiceError::Validation(_)));
        assert!(matches!(ServiceError::from(ModelError::Duplicate("x".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("x".into())), ServiceError::Db(_)));
    }
}
