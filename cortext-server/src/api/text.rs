//! Text API Handlers

use axum::{Json, extract::State};
use cortext_core::dto::text::{StatusResponse, WriteText};

use crate::api::error::ApiResult;
use crate::service::file_service;
use crate::state::AppState;

/// POST /write
/// Overwrite the input file with the submitted text
pub async fn write_text(
    State(state): State<AppState>,
    Json(req): Json<WriteText>,
) -> ApiResult<Json<StatusResponse>> {
    tracing::debug!("Writing {} bytes of input text", req.text.len());

    file_service::write_text(&state.config.input_file, &req.text).await?;

    Ok(Json(StatusResponse::success("Text written to file")))
}
