//! Prompt Error Types
//!
//! Prompt-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::INTERNAL_ERROR_MESSAGE, kind::ErrorKind};
use thiserror::Error;

/// Prompt-specific result type alias
pub type PromptResult<T> = Result<T, PromptError>;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Authentication or role failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Prompt not found")]
    PromptNotFound,

    /// Language id in a create or edit request does not resolve
    #[error("Invalid language")]
    InvalidLanguage,

    #[error("Language slug already exists")]
    SlugTaken,

    /// Missing or invalid request field
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptError::Auth(e) => e.kind(),
            PromptError::PromptNotFound => ErrorKind::NotFound,
            PromptError::InvalidLanguage | PromptError::Validation(_) => ErrorKind::BadRequest,
            PromptError::SlugTaken => ErrorKind::Conflict,
            PromptError::Database(_) | PromptError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            PromptError::Auth(e) => e.to_app_error(),
            PromptError::Database(_) | PromptError::Internal(_) => {
                AppError::new(self.kind(), INTERNAL_ERROR_MESSAGE)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PromptError::Auth(e) => e.log(),
            PromptError::Database(e) => {
                tracing::error!(error = %e, "Prompt database error");
            }
            PromptError::Internal(msg) => {
                tracing::error!(message = %msg, "Prompt internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Prompt error");
            }
        }
    }
}

impl IntoResponse for PromptError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for PromptError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => PromptError::Validation(err.message().to_string()),
            _ => PromptError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PromptError::PromptNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PromptError::InvalidLanguage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(PromptError::SlugTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            PromptError::from(AuthError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PromptError::from(AuthError::AuthenticationRequired).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_detail_hidden() {
        let err = PromptError::Internal("connection reset by 10.1.1.1".into());
        assert_eq!(err.to_app_error().message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_pagination_error_is_validation() {
        let err: PromptError = AppError::bad_request("page must be a positive integer").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
