//! Run API Handlers
//!
//! HTTP endpoints that trigger the external pipeline. Each request awaits
//! its processes to completion; concurrent requests are not serialized.

use axum::{Json, extract::State};
use cortext_core::domain::outcome::PipelineOutcome;
use cortext_core::domain::run::RunId;
use cortext_core::dto::run::NativeRunResponse;

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /run-java
/// Run the native phase alone
pub async fn run_native(State(state): State<AppState>) -> ApiResult<Json<NativeRunResponse>> {
    tracing::info!("Running native phase");

    let result = state
        .orchestrator
        .run_native()
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(NativeRunResponse::from(result)))
}

/// POST /run-python-scripts
/// Run the scripted phase alone
pub async fn run_scripts(State(state): State<AppState>) -> ApiResult<Json<PipelineOutcome>> {
    let run_id = RunId::generate();
    tracing::info!("Starting scripted run {}", run_id);

    state
        .orchestrator
        .run_scripts(run_id.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(run_id = %run_id, "Scripted run failed: {}", e);
            ApiError::run_failed(run_id, e.to_string())
        })
}

/// POST /run-full-process
/// Run the native phase, then the scripted phase if it succeeded
pub async fn run_full_process(
    State(state): State<AppState>,
) -> ApiResult<Json<PipelineOutcome>> {
    let run_id = RunId::generate();
    tracing::info!("Starting full run {}", run_id);

    state
        .orchestrator
        .run_full(run_id.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(run_id = %run_id, "Full run failed: {}", e);
            ApiError::run_failed(run_id, e.to_string())
        })
}
