use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use models::user::Role;
use service::auth::domain::LoginInput;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    pub role: Role,
}

/// Check credentials and report the caller's role. No token or cookie is issued.
#[utoipa::path(
    post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed body", body = crate::routes::MessageResponse),
        (status = 401, description = "Invalid username or password", body = crate::routes::MessageResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(input) = body?;
    let user = state.auth.login(&input).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        username: user.username,
        role: user.role,
    }))
}
