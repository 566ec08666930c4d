//! API Error Handling
//!
//! Unified error types and conversion for API responses.
//!
//! Error bodies use a `{"detail": ...}` envelope. `detail` is a string,
//! except for failed pipeline runs where it is a
//! [`RunErrorDetail`] carrying the run identifier.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cortext_core::domain::outcome::RunStatus;
use cortext_core::domain::run::RunId;
use cortext_core::dto::run::RunErrorDetail;

use crate::service::file_service::FileError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    InternalError(String),
    RunFailed(RunErrorDetail),
}

impl ApiError {
    /// A pipeline run that could not complete, tagged with its run id
    pub fn run_failed(run_id: RunId, message: impl Into<String>) -> Self {
        ApiError::RunFailed(RunErrorDetail {
            status: RunStatus::Error,
            message: message.into(),
            run_id,
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!(msg)),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!(msg))
            }
            ApiError::RunFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!(detail),
            ),
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound(_) => ApiError::NotFound("HTML file not found".to_string()),
            FileError::Io(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
