use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error body sent to clients: always `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(detail: &str) -> Self {
        error!(error = %detail, "request failed on storage");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ServiceError::Db(msg) => Self::internal(&msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::Repository(msg) => Self::internal(&msg),
        }
    }
}

// 框架的纯文本拒绝统一转换为 JSON 400
impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("c".into()), StatusCode::CONFLICT),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn storage_detail_is_not_exposed() {
        let e = ApiError::from(ServiceError::Db("relation \"students\" does not exist".into()));
        assert_eq!(e.message, "Internal server error");
    }

    #[test]
    fn unauthorized_uses_generic_message() {
        let e = ApiError::from(AuthError::Unauthorized);
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
        assert_eq!(e.message, "Invalid username or password");
    }
}
