use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::AuthService;
use service::students::{repository::SeaOrmStudentRepository, StudentService};
use service::users::{repository::SeaOrmUserRepository, UserService};

/// Services shared by every handler. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentService<SeaOrmStudentRepository>>,
    pub users: Arc<UserService<SeaOrmUserRepository>>,
    pub auth: Arc<AuthService<SeaOrmUserRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let student_repo = Arc::new(SeaOrmStudentRepository { db: db.clone() });
        let user_repo = Arc::new(SeaOrmUserRepository { db });
        Self {
            students: Arc::new(StudentService::new(student_repo)),
            users: Arc::new(UserService::new(Arc::clone(&user_repo))),
            auth: Arc::new(AuthService::new(user_repo)),
        }
    }
}
