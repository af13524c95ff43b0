//! Error handling for the forum backend
//!
//! This module defines the error type used throughout the service and its
//! mapping onto HTTP responses.

use actix_web::{HttpResponse, ResponseError};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::error;

/// Result type alias for the forum backend
pub type Result<T> = std::result::Result<T, ForumError>;

/// Process-wide development-mode flag, set once at startup.
///
/// When enabled, 5xx responses carry diagnostic detail; otherwise they
/// collapse to a generic message.
static DEV_MODE: OnceCell<bool> = OnceCell::new();

/// Record whether the server runs in development mode
pub fn set_development_mode(enabled: bool) {
    let _ = DEV_MODE.set(enabled);
}

fn development_mode() -> bool {
    DEV_MODE.get().copied().unwrap_or(false)
}

/// Main error type for the forum backend
#[derive(Error, Debug)]
pub enum ForumError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed or invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Input validation failures
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired session
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not authorized for the target resource
    #[error("{0}")]
    Forbidden(String),

    /// Target row absent, or a lost update race
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Connection pool exhaustion or other admission-control failures
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Password hashing or token generation failures
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Email delivery failures
    #[error("Email error: {0}")]
    Email(String),

    /// HTTP server failures
    #[error("Server error: {0}")]
    Server(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ForumError {
    /// Create a bad request error
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an unauthenticated error
    pub fn unauthenticated<S: Into<String>>(msg: S) -> Self {
        Self::Unauthenticated(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<sea_orm::DbErr> for ForumError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            // A request blocked on the pool too long is an admission-control
            // failure, not a storage failure.
            sea_orm::DbErr::ConnectionAcquire(_) => {
                ForumError::ServiceUnavailable("database connection pool exhausted".to_string())
            }
            other => ForumError::Database(other),
        }
    }
}

impl ResponseError for ForumError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ForumError::BadRequest(_) | ForumError::Validation(_) => StatusCode::BAD_REQUEST,
            ForumError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ForumError::Forbidden(_) => StatusCode::FORBIDDEN,
            ForumError::NotFound(_) => StatusCode::NOT_FOUND,
            ForumError::Conflict(_) => StatusCode::CONFLICT,
            ForumError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            error!(status = %status, "request failed: {}", self);
            if development_mode() {
                self.to_string()
            } else {
                "Internal server error".to_string()
            }
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ForumError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ForumError::unauthenticated("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ForumError::forbidden("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ForumError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ForumError::Conflict("x".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ForumError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pool_exhaustion_maps_to_service_unavailable() {
        let err: ForumError =
            sea_orm::DbErr::ConnectionAcquire(sea_orm::ConnAcquireErr::Timeout).into();
        assert!(matches!(err, ForumError::ServiceUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ForumError::forbidden("You are not authorized to edit this question");
        assert_eq!(
            err.to_string(),
            "You are not authorized to edit this question"
        );
    }
}
