//! Sequential pipeline runner
//!
//! Drives an ordered list of steps through a [`StepExecutor`], stopping at
//! the first non-zero exit. No retries, no skipping.

use cortext_core::domain::outcome::PipelineOutcome;
use cortext_core::domain::run::RunId;
use cortext_core::domain::step::StepCommand;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::executor::{ExecutorError, StepExecutor, preview};

const OUTPUT_PREVIEW_CHARS: usize = 200;

/// Fail-fast runner over a [`StepExecutor`]
#[derive(Clone)]
pub struct PipelineRunner {
    executor: Arc<dyn StepExecutor>,
}

impl PipelineRunner {
    pub fn new(executor: Arc<dyn StepExecutor>) -> Self {
        Self { executor }
    }

    /// Runs `steps` in order inside `work_dir`
    ///
    /// Each attempted step contributes exactly one result. On the first
    /// non-zero exit the remaining steps are never started and an error
    /// outcome carrying the results so far is returned. A step that cannot
    /// be launched aborts the run with [`ExecutorError`].
    pub async fn run(
        &self,
        run_id: RunId,
        steps: &[StepCommand],
        work_dir: &Path,
    ) -> Result<PipelineOutcome, ExecutorError> {
        let total = steps.len();
        let mut results = Vec::with_capacity(total);

        for (idx, step) in steps.iter().enumerate() {
            info!("Running step {}/{}: {}", idx + 1, total, step);

            let result = self.executor.execute(step, work_dir).await.inspect_err(|e| {
                error!("Step {}/{} could not be launched: {}", idx + 1, total, e);
            })?;

            if result.succeeded() {
                info!(
                    "Step {} completed successfully in {:.2} seconds",
                    result.command, result.duration_seconds
                );
            } else {
                error!(
                    "Step {} failed with return code {} in {:.2} seconds",
                    result.command, result.exit_code, result.duration_seconds
                );
                if !result.stderr.is_empty() {
                    error!("Error: {}", result.stderr);
                }
            }
            if !result.stdout.is_empty() {
                info!("Output: {}", preview(&result.stdout, OUTPUT_PREVIEW_CHARS));
            }

            let failed = !result.succeeded();
            let command = result.command.clone();
            results.push(result);

            if failed {
                error!("Stopping step sequence due to failure");
                return Ok(PipelineOutcome::error(
                    run_id,
                    format!("Script {} failed", command),
                    results,
                ));
            }
        }

        info!("All {} steps executed successfully", total);
        Ok(PipelineOutcome::success(
            run_id,
            "All scripts executed successfully",
            results,
        ))
    }
}
