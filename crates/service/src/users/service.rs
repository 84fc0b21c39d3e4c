use std::sync::Arc;

use tracing::{info, instrument};

use models::user::{self, Role};

use crate::errors::ServiceError;
use crate::users::domain::{CreateUserInput, CreatedUser};
use crate::users::repository::UserRepository;

/// Accounts offered as quick logins by the bundled frontend.
pub const DEMO_USERS: [(&str, &str, Role); 2] = [
    ("admin", "admin123", Role::Admin),
    ("user1", "user123", Role::User),
];

/// User management independent of the web framework.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every account with its password cleared.
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(user::Model::redacted).collect())
    }

    /// Validate and create an account.
    ///
    /// Checks run in order and the first failure is returned: username present,
    /// password of at least 4 characters, role `ADMIN` or `USER`, username free.
    ///
    /// # Examples
    /// ```
    /// use service::users::{UserService, domain::CreateUserInput, repository::mock::MockUserRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockUserRepository::default()));
    /// let created = tokio_test::block_on(svc.create(&CreateUserInput::new("clerk", "pass", "USER"))).unwrap();
    /// assert_eq!(created.username, "clerk");
    /// let again = tokio_test::block_on(svc.create(&CreateUserInput::new("clerk", "pass", "USER")));
    /// assert!(again.is_err());
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn create(&self, input: &CreateUserInput) -> Result<CreatedUser, ServiceError> {
        let username = input.username.as_deref().unwrap_or_default();
        user::validate_username(username)?;
        let password = input.password.as_deref().unwrap_or_default();
        user::validate_password(password)?;
        let role = Role::parse(input.role.as_deref().unwrap_or_default())?;

        let taken = || ServiceError::Conflict(format!("Username '{}' is already taken.", username));
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(taken());
        }
        let saved = self.repo.insert(username, password, role).await.map_err(|e| match e {
            ServiceError::Conflict(_) => taken(),
            other => other,
        })?;
        info!(user_id = saved.id, role = saved.role.as_str(), "user_created");
        Ok(CreatedUser { id: saved.id, username: saved.username, role: saved.role })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("User", id));
        }
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::not_found("User", id));
        }
        info!(user_id = id, "user_deleted");
        Ok(())
    }

    /// Insert each of [`DEMO_USERS`] whose username is free. Returns how many were created.
    pub async fn seed_demo_users(&self) -> Result<usize, ServiceError> {
        let mut created = 0;
        for (username, password, role) in DEMO_USERS {
            if self.repo.find_by_username(username).await?.is_some() {
                continue;
            }
            self.create(&CreateUserInput::new(username, password, role.as_str())).await?;
            created += 1;
        }
        if created > 0 {
            info!(created, "demo_users_seeded");
        }
        Ok(created)
    }
}
