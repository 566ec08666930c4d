//! API Module
//!
//! HTTP API layer for the pipeline service.
//! Each submodule handles endpoints for a specific concern.

pub mod artifact;
pub mod error;
pub mod health;
pub mod run;
pub mod text;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Files
        .route("/write", post(text::write_text))
        .route("/download-html", get(artifact::download_html))
        // Pipeline runs
        .route("/run-java", post(run::run_native))
        .route("/run-python-scripts", post(run::run_scripts))
        .route("/run-full-process", post(run::run_full_process))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
