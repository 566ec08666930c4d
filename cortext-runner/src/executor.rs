//! Single-step execution
//!
//! Runs one external command to completion and captures its exit code,
//! stdout, stderr and wall-clock duration. A non-zero exit is a normal
//! [`StepResult`]; only failing to launch the process is an error.

use async_trait::async_trait;
use cortext_core::domain::step::{StepCommand, StepResult};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors that prevent a step from producing a result
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The process could not be started (missing binary, permissions,
    /// missing working directory)
    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Executes a single step
///
/// Implementations wait until the process terminates. There is no timeout:
/// a hung process keeps the caller waiting.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(
        &self,
        command: &StepCommand,
        work_dir: &Path,
    ) -> Result<StepResult, ExecutorError>;
}

/// Executor that spawns real OS processes
#[derive(Debug, Default, Clone)]
pub struct ProcessExecutor {}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self {}
    }

    fn build_command(step: &StepCommand) -> Command {
        match step {
            StepCommand::Exec { program, args } => {
                let mut command = Command::new(program);
                command.args(args);
                command
            }
            StepCommand::Shell { line } => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(line);
                command
            }
        }
    }
}

#[async_trait]
impl StepExecutor for ProcessExecutor {
    async fn execute(
        &self,
        step: &StepCommand,
        work_dir: &Path,
    ) -> Result<StepResult, ExecutorError> {
        let rendered = step.to_string();
        debug!("Executing '{}' in {}", rendered, work_dir.display());

        let mut command = Self::build_command(step);
        command
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let started = Instant::now();
        let output = command
            .output()
            .await
            .map_err(|source| ExecutorError::Launch {
                command: rendered.clone(),
                source,
            })?;
        let duration_seconds = started.elapsed().as_secs_f64();

        let exit_code = exit_code(output.status);
        debug!(
            "'{}' exited with {} (stdout_len={}, stderr_len={})",
            rendered,
            exit_code,
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(StepResult {
            command: rendered,
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_seconds,
        })
    }
}

/// Maps an exit status to an integer code
///
/// Processes killed by a signal report the negated signal number, so they
/// are never mistaken for success.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// Returns at most `limit` characters of `text`, with `...` appended when
/// something was cut
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
