//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod run;
mod text;

pub use run::RunCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use cortext_client::CortextClient;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Overwrite the server's input text
    Write {
        /// Text to send
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Download the generated HTML artifact
    Download {
        /// Where to save it
        #[arg(short, long, default_value = "000_cortext_io.html")]
        output: PathBuf,
    },
    /// Trigger a pipeline run
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Check that the server is up
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = CortextClient::new(&config.server_url);

    match command {
        Commands::Write { text, file } => text::write(&client, text, file).await,
        Commands::Download { output } => text::download(&client, &output).await,
        Commands::Run { command } => run::handle_run_command(command, &client).await,
        Commands::Health => health(&client).await,
    }
}

async fn health(client: &CortextClient) -> Result<()> {
    client.health().await?;
    println!("{} {}", "✓".green().bold(), client.base_url());
    Ok(())
}
