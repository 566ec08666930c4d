//! Run DTOs
//!
//! The scripted and full runs reply with
//! [`PipelineOutcome`](crate::domain::outcome::PipelineOutcome) directly; the
//! types here cover the native-only reply and the structured error detail.

use serde::{Deserialize, Serialize};

use crate::domain::outcome::RunStatus;
use crate::domain::run::RunId;
use crate::domain::step::StepResult;

/// Reply of `POST /run-java`
///
/// `output` carries stdout on success, `error` carries stderr on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeRunResponse {
    pub status: RunStatus,
    pub message: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl From<StepResult> for NativeRunResponse {
    fn from(result: StepResult) -> Self {
        if result.succeeded() {
            Self {
                status: RunStatus::Success,
                message: "Native process executed successfully".to_string(),
                output: Some(result.stdout),
                error: None,
            }
        } else {
            Self {
                status: RunStatus::Error,
                message: "Native process failed".to_string(),
                output: None,
                error: Some(result.stderr),
            }
        }
    }
}

/// Structured detail carried by a 500 from the pipeline endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunErrorDetail {
    pub status: RunStatus,
    pub message: String,
    pub run_id: RunId,
}
