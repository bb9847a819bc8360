use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stockiq_core::errors::Error as CoreError;
use thiserror::Error;

/// Message returned for any server-side failure; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to fetch stock data. Please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    MethodNotAllowed(String),
}

/// Success envelope: `{"success": true, "data": …}`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Error envelope: `{"success": false, "error": msg, "timestamp": epoch_ms}`
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    timestamp: i64,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Core(e) => {
                tracing::error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
            ApiError::BadRequest(reason) => {
                tracing::warn!("Invalid request: {}", reason);
                (StatusCode::BAD_REQUEST, reason.clone())
            }
            ApiError::MethodNotAllowed(reason) => (StatusCode::METHOD_NOT_ALLOWED, reason.clone()),
        };
        let body = Json(ErrorBody {
            success: false,
            error: msg,
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
