use utoipa::OpenApi;
use utoipa::ToSchema;

use models::student::{Model as Student, StudentInput};
use models::user::{Model as User, Role};

use crate::routes::{auth::LoginResponse, students::CountResponse, users::CreateUserResponse, MessageResponse};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// `ADMIN` or `USER`
    pub role: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::students::list,
        crate::routes::students::search,
        crate::routes::students::count,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            Student,
            StudentInput,
            CountResponse,
            User,
            Role,
            CreateUserRequest,
            CreateUserResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "students"),
        (name = "users")
    )
)]
pub struct ApiDoc;
