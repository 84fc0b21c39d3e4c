use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use models::user::{Model as User, Role};
use service::users::domain::CreateUserInput;

use crate::{errors::ApiError, routes::MessageResponse, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub message: String,
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Passwords are always returned as an empty string.
#[utoipa::path(get, path = "/api/users", tag = "users", responses((status = 200, description = "All users, passwords redacted", body = [User])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = CreateUserResponse),
        (status = 400, description = "Validation Error", body = MessageResponse),
        (status = 409, description = "Username taken", body = MessageResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let Json(input) = body?;
    let created = state.users.create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully!".into(),
            id: created.id,
            username: created.username,
            role: created.role,
        }),
    ))
}

#[utoipa::path(
    delete, path = "/api/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.users.delete(id).await?;
    Ok(MessageResponse::new("User deleted successfully."))
}
