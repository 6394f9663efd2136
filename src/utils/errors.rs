//! Error handling
//!
//! Every error the application can produce, and its conversion into an
//! HTTP response with a uniform JSON body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Postgres SQLSTATE for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for an exclusion constraint violation
const EXCLUSION_VIOLATION: &str = "23P01";

/// Main application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Request timed out")]
    Timeout,
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            match db_error.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => {
                    return AppError::Conflict(format!(
                        "Datensatz wird noch referenziert oder Referenz fehlt: {}",
                        db_error.message()
                    ));
                }
                Some(EXCLUSION_VIOLATION) => {
                    return AppError::Conflict(format!(
                        "Zeitraum überschneidet sich mit einer bestehenden Buchung: {}",
                        db_error.message()
                    ));
                }
                Some(UNIQUE_VIOLATION) => {
                    return AppError::Conflict(format!(
                        "Datensatz existiert bereits: {}",
                        db_error.message()
                    ));
                }
                _ => {}
            }
        }
        AppError::Database(error)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> Self {
        AppError::Hash(error.to_string())
    }
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_)
            | AppError::Internal(_)
            | AppError::Jwt(_)
            | AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "❌ request failed");
        } else {
            tracing::warn!(error = %self, "⚠️ request rejected");
        }

        let body = match self {
            AppError::Database(e) => ErrorResponse::new(
                "Database Error",
                "An error occurred while accessing the database".to_string(),
                "DB_ERROR",
            )
            .with_details(json!({ "sql_error": e.to_string() })),

            AppError::Validation(e) => ErrorResponse::new(
                "Validation Error",
                "The provided data is invalid".to_string(),
                "VALIDATION_ERROR",
            )
            .with_details(json!(e)),

            AppError::Unauthorized(msg) => ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),

            AppError::NotFound(msg) => ErrorResponse::new("Not Found", msg, "NOT_FOUND"),

            AppError::Conflict(msg) => ErrorResponse::new("Conflict", msg, "CONFLICT"),

            AppError::BadRequest(msg) => ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),

            AppError::Internal(msg) => ErrorResponse::new(
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                "INTERNAL_ERROR",
            )
            .with_details(json!({ "internal_error": msg })),

            AppError::Jwt(msg) => ErrorResponse::new(
                "JWT Error",
                "An error occurred while issuing the token".to_string(),
                "JWT_ERROR",
            )
            .with_details(json!({ "jwt_error": msg })),

            AppError::Hash(msg) => ErrorResponse::new(
                "Hash Error",
                "An error occurred while processing credentials".to_string(),
                "HASH_ERROR",
            )
            .with_details(json!({ "hash_error": msg })),

            AppError::Timeout => ErrorResponse::new(
                "Request Timeout",
                "The request took too long to complete".to_string(),
                "TIMEOUT",
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Typed result for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Helper for a record that does not exist
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} mit id '{}' nicht gefunden", resource, id))
}

/// Helper for a record that is still referenced elsewhere
pub fn referenced_error(resource: &str, id: i64, by: &str) -> AppError {
    AppError::Conflict(format!(
        "{} mit id '{}' wird noch von {} referenziert",
        resource, id, by
    ))
}

/// Helper for a reference to a record that does not exist
pub fn missing_reference_error(resource: &str, id: i64) -> AppError {
    AppError::BadRequest(format!("Referenzierte(r) {} mit id '{}' existiert nicht", resource, id))
}
