use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use room_topology::TopologyError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid plan key: {0}")]
    InvalidKey(String),

    #[error("Plan not found: {0}")]
    NotFound(String),

    #[error("Inconsistent floor plan: {0}")]
    Topology(#[from] TopologyError),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored plan is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Topology task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::InvalidKey(_) => (StatusCode::BAD_REQUEST, "INVALID_KEY"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Topology(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INCONSISTENT_PLAN"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILED"),
            ApiError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CORRUPT_PLAN"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_FAILED"),
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
