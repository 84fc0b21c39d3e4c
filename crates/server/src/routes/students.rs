use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use models::student::{Model as Student, StudentInput};
use service::errors::ServiceError;

use crate::{errors::ApiError, routes::MessageResponse, state::AppState};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for, case-insensitive. Missing or empty matches everyone.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub total: u64,
}

#[utoipa::path(get, path = "/api/students", tag = "students", responses((status = 200, description = "All students", body = [Student])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.students.list().await?))
}

#[utoipa::path(
    get, path = "/api/students/search", tag = "students",
    params(SearchQuery),
    responses((status = 200, description = "Matching students", body = [Student]))
)]
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let Query(q) = query?;
    Ok(Json(state.students.search_by_name(&q.name).await?))
}

#[utoipa::path(get, path = "/api/students/count", tag = "students", responses((status = 200, description = "Total number of students", body = CountResponse)))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let total = state.students.count().await?;
    Ok(Json(CountResponse { total }))
}

#[utoipa::path(
    get, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "OK", body = Student),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.students.get(id).await?))
}

/// Any `id` in the body is ignored; storage assigns one.
#[utoipa::path(
    post, path = "/api/students", tag = "students",
    request_body = StudentInput,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Failed to add student", body = MessageResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(input) = body?;
    let created = state.students.create(&input).await.map_err(|e| match e {
        ServiceError::Validation(reason) | ServiceError::Conflict(reason) => {
            ApiError::bad_request(format!("Failed to add student: {reason}"))
        }
        other => ApiError::from(other),
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Updated", body = Student),
        (status = 400, description = "Validation Error", body = MessageResponse),
        (status = 404, description = "Not Found", body = MessageResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let updated = state.students.update(id, &input).await.map_err(|e| match e {
        // 邮箱冲突按客户端输入错误处理
        ServiceError::Conflict(reason) => ApiError::bad_request(reason),
        other => ApiError::from(other),
    })?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
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
    state.students.delete(id).await?;
    Ok(MessageResponse::new("Student deleted successfully"))
}
