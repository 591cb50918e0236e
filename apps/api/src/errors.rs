use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::ProviderError;

pub const NOT_FOUND_MESSAGE: &str = "resource not found";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Server has encountered an unknown error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("resource not found")]
    NotFound,

    /// One entry per failed field, in the order the fields were checked.
    #[error("bad request: {}", .0.join("; "))]
    BadRequest(Vec<String>),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Integration error: {0}")]
    Integration(#[from] ProviderError),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(conflict_message(db_err.constraint()).to_string());
            }
        }
        AppError::Database(err)
    }
}

/// Maps a unique constraint name to the field it protects.
fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("username") => "username already exists",
        Some(name) if name.contains("email") => "email already exists",
        _ => "resource already exists",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Integration(e) => {
                tracing::error!("Integration error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let code = status.as_u16();
        let body = match self {
            AppError::NotFound => json!({
                "success": false,
                "error": code,
                "message": NOT_FOUND_MESSAGE,
            }),
            AppError::BadRequest(errors) => json!({
                "success": false,
                "error": code,
                "errors": errors,
            }),
            AppError::Conflict(message) => json!({
                "success": false,
                "error": code,
                "errors": [message],
            }),
            AppError::Database(_) | AppError::Integration(_) => json!({
                "success": false,
                "error": code,
                "message": UNKNOWN_ERROR_MESSAGE,
            }),
        };

        (status, Json(body)).into_response()
    }
}
