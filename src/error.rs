//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::error::ErrorKind;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<BTreeMap<String, String>>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("database: {0}")]
    Db(#[source] sqlx::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Validation failure carrying the per-field violation map.
    pub fn validation_details(details: BTreeMap<String, String>) -> Self {
        ApiError::Validation {
            message: "Validation failed".into(),
            details: Some(details),
        }
    }

    pub fn not_found() -> Self {
        ApiError::NotFound("User not found".into())
    }
}

/// Translate native store errors so no raw sqlx error escapes the repository:
/// unique constraint -> Duplicate, other constraint -> Validation, rest -> Db.
impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    return ApiError::Duplicate("Email address already exists".into());
                }
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return ApiError::validation("Invalid data provided");
                }
                _ => {}
            }
        }
        ApiError::Db(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let (error, details) = match self {
            ApiError::Validation { message, details } => (message, details),
            ApiError::NotFound(m) | ApiError::Duplicate(m) => (m, None),
            // Internal detail stays in the log.
            ApiError::Db(_) => ("Database operation failed".into(), None),
        };
        let mut body = serde_json::json!({
            "success": false,
            "error": error,
        });
        if let Some(details) = details {
            body["details"] = serde_json::json!(details);
        }
        (status, Json(body)).into_response()
    }
}
