use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{AuthenticatedUser, LoginInput};
use super::errors::AuthError;
use crate::users::repository::UserRepository;

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Exact username lookup followed by exact password comparison.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::LoginInput};
    /// use service::users::repository::{mock::MockUserRepository, UserRepository};
    /// use models::user::Role;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// tokio_test::block_on(repo.insert("admin", "admin123", Role::Admin)).unwrap();
    /// let svc = AuthService::new(repo);
    /// let input = LoginInput { username: "admin".into(), password: "admin123".into() };
    /// let user = tokio_test::block_on(svc.login(&input)).unwrap();
    /// assert_eq!(user.role, Role::Admin);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: &LoginInput) -> Result<AuthenticatedUser, AuthError> {
        let Some(user) = self.repo.find_by_username(&input.username).await? else {
            debug!("unknown username");
            return Err(AuthError::Unauthorized);
        };
        if user.password != input.password {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }
        info!(user_id = user.id, role = user.role.as_str(), "user_logged_in");
        Ok(AuthenticatedUser { username: user.username, role: user.role })
    }
}
