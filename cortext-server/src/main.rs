use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cortext_server::config::Config;
use cortext_server::create_router;
use cortext_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    init_tracing(&config.log_file)?;

    tracing::info!("Starting Cortext server...");
    tracing::info!(
        "Input file: {}, HTML artifact: {}, work dir: {}",
        config.input_file.display(),
        config.html_file.display(),
        config.work_dir.display()
    );
    tracing::info!(
        "Native phase: {}; scripted phase: {} step(s)",
        config.native_command,
        config.script_steps.len()
    );

    if !config.work_dir.is_dir() {
        tracing::warn!(
            "Work directory {} does not exist yet; runs will fail to launch until it does",
            config.work_dir.display()
        );
    }

    let addr = config.bind_addr.clone();
    let app = create_router(AppState::new(config));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

/// Logs to stderr and appends to the diagnostic log file
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cortext_server=debug,cortext_runner=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
