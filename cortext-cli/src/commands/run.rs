//! Run command handlers
//!
//! Triggers pipeline runs and prints a per-step summary. A run whose status
//! is `error` makes the command exit non-zero.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use cortext_client::{ClientError, CortextClient};
use cortext_core::domain::outcome::{PipelineOutcome, RunStatus};
use cortext_core::domain::step::StepResult;

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// Run the native phase only
    Native,
    /// Run the scripted phase only
    Scripts {
        /// Print full stdout/stderr of every step
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run the native phase, then the scripted phase
    Full {
        /// Print full stdout/stderr of every step
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, client: &CortextClient) -> Result<()> {
    match command {
        RunCommands::Native => run_native(client).await,
        RunCommands::Scripts { verbose } => {
            let outcome = client.run_scripts().await.map_err(report_run_error)?;
            print_outcome(&outcome, verbose);
            check_outcome(&outcome)
        }
        RunCommands::Full { verbose } => {
            let outcome = client.run_full_process().await.map_err(report_run_error)?;
            print_outcome(&outcome, verbose);
            check_outcome(&outcome)
        }
    }
}

async fn run_native(client: &CortextClient) -> Result<()> {
    let response = client.run_native().await?;

    println!("{} {}", status_marker(response.status), response.message.bold());
    if let Some(output) = response.output.filter(|o| !o.trim().is_empty()) {
        println!("\n{}", "Output:".bold());
        println!("{}", output.trim_end());
    }
    if let Some(error) = response.error.filter(|e| !e.trim().is_empty()) {
        println!("\n{}", "Error:".bold());
        println!("{}", error.trim_end().red());
    }

    match response.status {
        RunStatus::Success => Ok(()),
        RunStatus::Error => anyhow::bail!("native process failed"),
    }
}

/// Prints the run id of a failed run before handing the error on
fn report_run_error(err: ClientError) -> anyhow::Error {
    if let Some(detail) = err.run_error() {
        println!("{} {}", "✗".red().bold(), detail.message.red());
        println!("  Run ID: {}", detail.run_id.to_string().cyan());
    }
    err.into()
}

fn print_outcome(outcome: &PipelineOutcome, verbose: bool) {
    println!("{} {}", status_marker(outcome.status), outcome.message.bold());
    println!("  Run ID: {}", outcome.run_id.to_string().cyan());

    if outcome.results.is_empty() {
        println!("  {}", "No steps were run.".dimmed());
        return;
    }

    println!();
    for (idx, step) in outcome.results.iter().enumerate() {
        print_step(idx + 1, step, verbose);
    }
}

fn print_step(position: usize, step: &StepResult, verbose: bool) {
    let code = if step.succeeded() {
        step.exit_code.to_string().green()
    } else {
        step.exit_code.to_string().red()
    };

    println!(
        "  {} {} {}",
        format!("{}.", position).dimmed(),
        step.command.bold(),
        format!("(exit {}, {})", code, format_duration(step.duration_seconds)).dimmed()
    );

    if verbose && !step.stdout.trim().is_empty() {
        println!("{}", indent(step.stdout.trim_end()));
    }
    if (verbose || !step.succeeded()) && !step.stderr.trim().is_empty() {
        println!("{}", indent(step.stderr.trim_end()).red());
    }
}

fn check_outcome(outcome: &PipelineOutcome) -> Result<()> {
    match outcome.status {
        RunStatus::Success => Ok(()),
        RunStatus::Error => anyhow::bail!("run {} failed", outcome.run_id),
    }
}

fn status_marker(status: RunStatus) -> ColoredString {
    match status {
        RunStatus::Success => "✓".green().bold(),
        RunStatus::Error => "✗".red().bold(),
    }
}

fn format_duration(seconds: f64) -> String {
    if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        format!("{}m{:.0}s", minutes, seconds - minutes * 60.0)
    } else {
        format!("{:.2}s", seconds)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("       {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortext_core::domain::run::RunId;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0.00s");
        assert_eq!(format_duration(1.234), "1.23s");
        assert_eq!(format_duration(125.0), "2m5s");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb"), "       a\n       b");
    }

    #[test]
    fn test_check_outcome() {
        let ok = PipelineOutcome::success(RunId::from("r".to_string()), "done", vec![]);
        assert!(check_outcome(&ok).is_ok());

        let failed = PipelineOutcome::error(RunId::from("r".to_string()), "Script x failed", vec![]);
        let err = check_outcome(&failed).unwrap_err();
        assert_eq!(err.to_string(), "run r failed");
    }
}
