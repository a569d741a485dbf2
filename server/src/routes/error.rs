//! JSON error responses for API routes.
//!
//! ERROR HANDLING
//! ==============
//! Every API failure leaves the server as `(status, {"error": message})`.
//! Client-caused errors carry their message verbatim; internal failures are
//! logged with detail and reported with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::rate_limit::RateLimitError;
use crate::services::attendance::AttendanceError;
use crate::services::auth::AuthError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const UNAUTHORIZED_MESSAGE: &str = "Not authenticated";
pub const FORBIDDEN_MESSAGE: &str = "Admin access required";

#[derive(Debug, Clone, PartialEq, Eq)]
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

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE)
    }

    /// Log `detail` and hide it behind the generic message.
    pub fn internal(detail: &impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingName | AuthError::InvalidEmail | AuthError::WeakPassword(_) | AuthError::InvalidRole(_) => {
                Self::bad_request(err.to_string())
            }
            AuthError::EmailTaken => Self::new(StatusCode::CONFLICT, err.to_string()),
            AuthError::InvalidCredentials => Self::new(StatusCode::UNAUTHORIZED, err.to_string()),
            AuthError::Hash(_) | AuthError::Db(_) => Self::internal(&err),
        }
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::StudentNotFound(_) => Self::new(StatusCode::NOT_FOUND, "Student not found"),
            AttendanceError::DuplicateRollNumber(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            AttendanceError::MissingField(_) => Self::bad_request(err.to_string()),
            AttendanceError::Database(_) => Self::internal(&err),
        }
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal(&err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
