use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Status and client-facing message. Storage and io detail stays in the logs.
    pub fn to_response(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into())
            }
            AppError::EnvError(_) | AppError::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server error".into(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.to_response();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_detail() {
        let err = AppError::DatabaseError("no such table: Feedback".into());
        let (status, msg) = err.to_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Database error");
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let (status, msg) = AppError::BadRequest("Invalid ID".into()).to_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Invalid ID");

        let (status, msg) = AppError::NotFound("Feedback not found".into()).to_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "Feedback not found");
    }

    #[test]
    fn test_io_and_env_errors_are_generic() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/db is read-only");
        let err: AppError = io.into();
        let (status, msg) = err.to_response();

        assert!(matches!(err, AppError::IoError(_)));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Unexpected server error");

        let (status, msg) = AppError::EnvError("PORT is not a valid port: x".into()).to_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("PORT"));
    }
}
