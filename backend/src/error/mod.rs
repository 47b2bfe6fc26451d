//! Centralized API error handling for the account service
//!
//! This module provides a unified error type for API responses with proper
//! HTTP status code mapping and the `{ status, message, data }` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::{HashingError, TokenError};
use crate::models::ApiResponse;
use crate::services::AccountError;
use crate::store::StoreError;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log server errors
        match &self {
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                tracing::error!(error = %message, code = %error_code, "Server error occurred");
            }
            _ => {
                tracing::debug!(error = %message, code = %error_code, "Client error occurred");
            }
        }

        ApiResponse::error(status, message).into_response()
    }
}

// Convenience conversions from domain error types

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Account not found".to_string()),
            StoreError::DuplicateEmail => {
                ApiError::Conflict("An account with this email already exists".to_string())
            }
            StoreError::Timeout(_) | StoreError::Backend(_) => {
                ApiError::DatabaseError(err.to_string())
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound => ApiError::NotFound("Account not found".to_string()),
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AccountError::Store(e) => e.into(),
            AccountError::Hashing(e) => e.into(),
            AccountError::Token(e) => e.into(),
        }
    }
}

impl From<HashingError> for ApiError {
    fn from(err: HashingError) -> Self {
        match err {
            HashingError::PasswordTooLong => ApiError::ValidationError(err.to_string()),
            HashingError::HashFailed(_) | HashingError::MalformedHash(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            TokenError::SigningFailed(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            ApiError::BadRequest("test".to_string()).error_code(),
            "BAD_REQUEST"
        );
        assert_eq!(
            ApiError::Unauthorized("test".to_string()).error_code(),
            "UNAUTHORIZED"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ValidationError("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("test".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::DatabaseError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_account_error_mapping() {
        let not_found: ApiError = AccountError::NotFound.into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let credentials: ApiError = AccountError::InvalidCredentials.into();
        assert_eq!(credentials.status_code(), StatusCode::UNAUTHORIZED);

        let duplicate: ApiError = AccountError::Store(StoreError::DuplicateEmail).into();
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

        let timeout: ApiError = AccountError::Store(StoreError::Timeout("find_all")).into();
        assert_eq!(timeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let too_long: ApiError = AccountError::Hashing(HashingError::PasswordTooLong).into();
        assert_eq!(too_long.status_code(), StatusCode::BAD_REQUEST);

        let malformed: ApiError =
            AccountError::Hashing(HashingError::MalformedHash("bad".to_string())).into();
        assert_eq!(malformed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = ApiError::NotFound("Account not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["status"], 404);
        assert_eq!(value["message"], "error");
        assert!(value["data"].as_str().unwrap().contains("Account not found"));
    }
}
