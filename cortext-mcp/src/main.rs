//! Cortext MCP Server Binary
//!
//! Runs the Cortext tools over stdio. Paths and commands come from the same
//! CORTEXT_* environment variables as the HTTP server.

use anyhow::{Context, Result};
use cortext_mcp::CortextTools;
use cortext_server::config::Config;
use cortext_server::state::AppState;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    info!(
        input_file = %config.input_file.display(),
        html_file = %config.html_file.display(),
        work_dir = %config.work_dir.display(),
        "Starting Cortext MCP server"
    );

    let service = CortextTools::new(AppState::new(config));
    let server = service.serve(stdio()).await?;

    info!("Cortext MCP server running");

    server.waiting().await?;

    info!("Cortext MCP server shutting down");

    Ok(())
}
