//! Artifact API Handlers

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::api::error::ApiResult;
use crate::service::file_service;
use crate::state::AppState;

/// GET /download-html
/// Stream the generated HTML artifact as an attachment
pub async fn download_html(State(state): State<AppState>) -> ApiResult<Response> {
    let path = &state.config.html_file;
    tracing::debug!("Serving artifact: {}", path.display());

    let artifact = file_service::open_artifact(path).await?;
    let body = Body::from_stream(ReaderStream::new(artifact.file));

    let disposition = format!("attachment; filename=\"{}\"", state.config.download_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/html".to_string()),
            (header::CONTENT_LENGTH, artifact.len.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
