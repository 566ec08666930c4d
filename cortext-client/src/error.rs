//! Error types for the Cortext client

use cortext_core::dto::run::RunErrorDetail;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Cortext client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw error body from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Human-readable `detail` of an API error body, if it has one
    pub fn detail(&self) -> Option<String> {
        let Self::ApiError { message, .. } = self else {
            return None;
        };
        let body: serde_json::Value = serde_json::from_str(message).ok()?;
        match &body["detail"] {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => body["detail"]["message"].as_str().map(String::from),
            _ => None,
        }
    }

    /// Structured detail of a failed pipeline run, including its run id
    pub fn run_error(&self) -> Option<RunErrorDetail> {
        let Self::ApiError { message, .. } = self else {
            return None;
        };
        let body: serde_json::Value = serde_json::from_str(message).ok()?;
        serde_json::from_value(body.get("detail")?.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(ClientError::api_error(404, "").is_not_found());
        assert!(!ClientError::api_error(500, "").is_not_found());
        assert!(ClientError::api_error(500, "").is_server_error());
        assert!(!ClientError::api_error(404, "").is_server_error());
    }

    #[test]
    fn test_detail_from_string_body() {
        let err = ClientError::api_error(404, r#"{"detail":"HTML file not found"}"#);
        assert_eq!(err.detail().as_deref(), Some("HTML file not found"));
        assert!(err.run_error().is_none());
    }

    #[test]
    fn test_run_error_from_structured_body() {
        let err = ClientError::api_error(
            500,
            r#"{"detail":{"status":"error","message":"Failed to launch 'x'","run_id":"r-1"}}"#,
        );

        let detail = err.run_error().unwrap();
        assert_eq!(detail.run_id.as_str(), "r-1");
        assert_eq!(detail.message, "Failed to launch 'x'");
        assert_eq!(err.detail().as_deref(), Some("Failed to launch 'x'"));
    }

    #[test]
    fn test_detail_of_unparseable_body() {
        let err = ClientError::api_error(502, "Bad Gateway");
        assert!(err.detail().is_none());
        assert!(err.run_error().is_none());
    }
}
