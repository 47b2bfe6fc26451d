//! Data models for the account service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub mod account;
pub use account::*;

/// API response envelope: `{ status, message, data }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: "success".to_string(),
            data,
        }
    }

    /// 200 OK response carrying `data`
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }
}

impl ApiResponse<String> {
    /// Error response with a human-readable detail in `data`
    pub fn error(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: "error".to_string(),
            data: detail.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
