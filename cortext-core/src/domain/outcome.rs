//! Pipeline outcome types

use serde::{Deserialize, Serialize};

use crate::domain::run::RunId;
use crate::domain::step::StepResult;

/// Logical status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// Aggregated result of a pipeline run
///
/// `results` holds one entry per attempted step, in execution order. Steps
/// that never ran are not represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub status: RunStatus,
    pub message: String,
    pub run_id: RunId,
    pub results: Vec<StepResult>,
}

impl PipelineOutcome {
    pub fn success(run_id: RunId, message: impl Into<String>, results: Vec<StepResult>) -> Self {
        Self {
            status: RunStatus::Success,
            message: message.into(),
            run_id,
            results,
        }
    }

    pub fn error(run_id: RunId, message: impl Into<String>, results: Vec<StepResult>) -> Self {
        Self {
            status: RunStatus::Error,
            message: message.into(),
            run_id,
            results,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}
