use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::student::{self, StudentInput};

use crate::errors::ServiceError;

/// Data access for the `students` table.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError>;
    async fn find_by_name_containing_ignore_case(&self, fragment: &str) -> Result<Vec<student::Model>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn insert(&self, input: &StudentInput) -> Result<student::Model, ServiceError>;
    async fn update(&self, existing: student::Model, input: &StudentInput) -> Result<student::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::find_by_id(&self.db, id).await?)
    }

    async fn find_by_name_containing_ignore_case(&self, fragment: &str) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::find_by_name_containing_ignore_case(&self.db, fragment).await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(student::count(&self.db).await?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(student::exists_by_id(&self.db, id).await?)
    }

    async fn insert(&self, input: &StudentInput) -> Result<student::Model, ServiceError> {
        Ok(student::create(&self.db, input).await?)
    }

    async fn update(&self, existing: student::Model, input: &StudentInput) -> Result<student::Model, ServiceError> {
        Ok(student::update(&self.db, existing, input).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(student::delete_by_id(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        last_id: i64,
        rows: BTreeMap<i64, student::Model>, // key: id
    }

    #[derive(Default)]
    pub struct MockStudentRepository {
        state: Mutex<State>,
    }

    fn email_taken(state: &State, email: &str, except: Option<i64>) -> bool {
        state.rows.values().any(|s| s.email == email && Some(s.id) != except)
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
            Ok(self.state.lock().await.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.state.lock().await.rows.get(&id).cloned())
        }

        async fn find_by_name_containing_ignore_case(&self, fragment: &str) -> Result<Vec<student::Model>, ServiceError> {
            let needle = fragment.to_lowercase();
            let state = self.state.lock().await;
            Ok(state.rows.values().filter(|s| s.name.to_lowercase().contains(&needle)).cloned().collect())
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.state.lock().await.rows.len() as u64)
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.lock().await.rows.contains_key(&id))
        }

        async fn insert(&self, input: &StudentInput) -> Result<student::Model, ServiceError> {
            input.validate()?;
            let mut state = self.state.lock().await;
            if email_taken(&state, &input.email, None) {
                return Err(ServiceError::Conflict("students.email".into()));
            }
            state.last_id += 1;
            let row = student::Model {
                id: state.last_id,
                name: input.name.clone(),
                email: input.email.clone(),
                course: input.course.clone(),
                department: input.department.clone(),
            };
            state.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, existing: student::Model, input: &StudentInput) -> Result<student::Model, ServiceError> {
            input.validate()?;
            let mut state = self.state.lock().await;
            if email_taken(&state, &input.email, Some(existing.id)) {
                return Err(ServiceError::Conflict("students.email".into()));
            }
            let row = student::Model {
                id: existing.id,
                name: input.name.clone(),
                email: input.email.clone(),
                course: input.course.clone(),
                department: input.department.clone(),
            };
            state.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.lock().await.rows.remove(&id).is_some())
        }
    }
}
