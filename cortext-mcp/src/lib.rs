//! MCP Server for the Cortext pipeline
//!
//! Exposes the same operations as the HTTP API as MCP tools, so an AI model
//! can feed input text, trigger runs and fetch the generated artifact:
//! - `write_to_file` - Overwrite the input text
//! - `download_html` - Fetch the generated HTML artifact
//! - `run_java` - Run the native phase alone
//! - `run_python_scripts` - Run the scripted phase alone
//! - `run_full_process` - Run both phases, fail-fast
//!
//! Tool results carry the same JSON bodies the HTTP endpoints return. Failures
//! the HTTP API reports as 404/500 become MCP errors.

use cortext_core::domain::outcome::{PipelineOutcome, RunStatus};
use cortext_core::domain::run::RunId;
use cortext_core::dto::run::{NativeRunResponse, RunErrorDetail};
use cortext_core::dto::text::StatusResponse;
use cortext_server::service::file_service::{self, FileError};
use cortext_server::state::AppState;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::future::Future;
use tracing::{error, info};

const INTERNAL_ERROR: ErrorCode = ErrorCode(-32603);
const RESOURCE_NOT_FOUND: ErrorCode = ErrorCode(-32002);

/// Request to overwrite the input text
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WriteToFileRequest {
    /// Text the next run will read
    #[schemars(description = "Text to store as the pipeline input. Replaces any previous text.")]
    pub text: String,
}

/// Cortext MCP Service
#[derive(Clone)]
pub struct CortextTools {
    state: AppState,
    tool_router: ToolRouter<CortextTools>,
}

impl CortextTools {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl CortextTools {
    #[tool(description = "Overwrite the pipeline input text. Run the pipeline afterwards to process it.")]
    async fn write_to_file(
        &self,
        Parameters(request): Parameters<WriteToFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(bytes = request.text.len(), "Writing input text");

        file_service::write_text(&self.state.config.input_file, &request.text)
            .await
            .map_err(file_error)?;

        json_result(&StatusResponse::success("Text written to file"))
    }

    #[tool(description = "Fetch the HTML report produced by the last successful run.")]
    async fn download_html(&self) -> Result<CallToolResult, McpError> {
        let bytes = file_service::read_artifact(&self.state.config.html_file)
            .await
            .map_err(file_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            String::from_utf8_lossy(&bytes).to_string(),
        )]))
    }

    #[tool(description = "Run the native layout executable alone. Returns its stdout on success or stderr on failure.")]
    async fn run_java(&self) -> Result<CallToolResult, McpError> {
        info!("Running native phase");

        let result = self
            .state
            .orchestrator
            .run_native()
            .await
            .map_err(|e| internal_error(e.to_string(), None))?;

        json_result(&NativeRunResponse::from(result))
    }

    #[tool(description = "Run the analysis scripts in order, stopping at the first failure. Returns one result per executed script.")]
    async fn run_python_scripts(&self) -> Result<CallToolResult, McpError> {
        let run_id = RunId::generate();
        info!(run_id = %run_id, "Starting scripted run");

        let outcome = self.state.orchestrator.run_scripts(run_id.clone()).await;
        outcome_result(run_id, outcome)
    }

    #[tool(description = "Run the native executable, then the analysis scripts if it succeeded.")]
    async fn run_full_process(&self) -> Result<CallToolResult, McpError> {
        let run_id = RunId::generate();
        info!(run_id = %run_id, "Starting full run");

        let outcome = self.state.orchestrator.run_full(run_id.clone()).await;
        outcome_result(run_id, outcome)
    }
}

#[tool_handler]
impl ServerHandler for CortextTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cortext-io".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "API for Cortext IO text processing.\n\n\
                 Call write_to_file with the input text, then run_full_process. \
                 When the run status is success, download_html returns the report."
                    .to_string(),
            ),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| internal_error(format!("Failed to encode result: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

fn outcome_result<E: std::fmt::Display>(
    run_id: RunId,
    outcome: Result<PipelineOutcome, E>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(outcome) => json_result(&outcome),
        Err(e) => {
            error!(run_id = %run_id, "Run failed: {}", e);
            let detail = RunErrorDetail {
                status: RunStatus::Error,
                message: e.to_string(),
                run_id,
            };
            Err(internal_error(
                e.to_string(),
                serde_json::to_value(&detail).ok(),
            ))
        }
    }
}

fn file_error(err: FileError) -> McpError {
    match err {
        FileError::NotFound(_) => McpError {
            code: RESOURCE_NOT_FOUND,
            message: Cow::from("HTML file not found"),
            data: None,
        },
        FileError::Io(err) => internal_error(err.to_string(), None),
    }
}

fn internal_error(message: String, data: Option<serde_json::Value>) -> McpError {
    McpError {
        code: INTERNAL_ERROR,
        message: Cow::from(message),
        data,
    }
}
