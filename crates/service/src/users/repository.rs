use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::user::{self, Role};

use crate::errors::ServiceError;

/// Data access for the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn insert(&self, username: &str, password: &str, role: Role) -> Result<user::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::find_by_id(&self.db, id).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::find_by_username(&self.db, username).await?)
    }

    async fn insert(&self, username: &str, password: &str, role: Role) -> Result<user::Model, ServiceError> {
        Ok(user::create(&self.db, username, password, role).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(user::delete_by_id(&self.db, id).await?)
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
        rows: BTreeMap<i64, user::Model>, // key: id
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        state: Mutex<State>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.state.lock().await.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.state.lock().await.rows.get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
            let state = self.state.lock().await;
            Ok(state.rows.values().find(|u| u.username == username).cloned())
        }

        async fn insert(&self, username: &str, password: &str, role: Role) -> Result<user::Model, ServiceError> {
            let mut state = self.state.lock().await;
            if state.rows.values().any(|u| u.username == username) {
                return Err(ServiceError::Conflict("users.username".into()));
            }
            state.last_id += 1;
            let row = user::Model { id: state.last_id, username: username.to_string(), password: password.to_string(), role };
            state.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.lock().await.rows.remove(&id).is_some())
        }
    }
}
