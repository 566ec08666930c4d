//! Text input DTOs

use serde::{Deserialize, Serialize};

use crate::domain::outcome::RunStatus;

/// Request body for `POST /write`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteText {
    pub text: String,
}

/// Generic status reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: RunStatus,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Success,
            message: message.into(),
        }
    }
}
