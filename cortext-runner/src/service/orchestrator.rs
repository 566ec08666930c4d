//! Two-phase orchestrator
//!
//! Phase 1 runs the native executable once. Phase 2, the scripted
//! sequence, only starts when phase 1 exited 0, and goes through the same
//! [`PipelineRunner`] used by the scripts-only run.

use cortext_core::domain::outcome::PipelineOutcome;
use cortext_core::domain::run::RunId;
use cortext_core::domain::step::{StepCommand, StepResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};

use crate::executor::{ExecutorError, StepExecutor, preview};
use crate::service::pipeline::PipelineRunner;

/// What to run, and where
#[derive(Debug, Clone)]
pub struct PhasePlan {
    /// Phase 1: the native executable
    pub native: StepCommand,
    /// Phase 2: the scripted sequence
    pub scripts: Vec<StepCommand>,
    /// Working directory for both phases
    pub work_dir: PathBuf,
}

pub struct Orchestrator {
    executor: Arc<dyn StepExecutor>,
    runner: PipelineRunner,
    plan: PhasePlan,
}

impl Orchestrator {
    pub fn new(executor: Arc<dyn StepExecutor>, plan: PhasePlan) -> Self {
        Self {
            runner: PipelineRunner::new(executor.clone()),
            executor,
            plan,
        }
    }

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    /// Runs phase 1 alone and returns its raw result
    pub async fn run_native(&self) -> Result<StepResult, ExecutorError> {
        info!("Running native process: {}", self.plan.native);

        let result = self
            .executor
            .execute(&self.plan.native, &self.plan.work_dir)
            .await?;

        if result.succeeded() {
            info!(
                "Native process completed in {:.2} seconds",
                result.duration_seconds
            );
        } else {
            error!(
                "Native process failed with return code {} in {:.2} seconds: {}",
                result.exit_code,
                result.duration_seconds,
                preview(&result.stderr, 200)
            );
        }

        Ok(result)
    }

    /// Runs phase 2 alone under `run_id`
    pub async fn run_scripts(&self, run_id: RunId) -> Result<PipelineOutcome, ExecutorError> {
        let span = info_span!("run", run_id = %run_id);
        async {
            info!(
                "Starting scripted phase ({} steps) in {}",
                self.plan.scripts.len(),
                self.plan.work_dir.display()
            );
            self.runner
                .run(run_id, &self.plan.scripts, &self.plan.work_dir)
                .await
        }
        .instrument(span)
        .await
    }

    /// Runs phase 1 then, if it succeeded, phase 2, all under `run_id`
    ///
    /// A failing phase 1 short-circuits: the outcome is an error with the
    /// captured stderr in its message and an empty result list.
    pub async fn run_full(&self, run_id: RunId) -> Result<PipelineOutcome, ExecutorError> {
        let span = info_span!("run", run_id = %run_id);
        async {
            info!("Starting full process");

            let native = self.run_native().await?;
            if !native.succeeded() {
                error!("Skipping scripted phase because the native process failed");
                return Ok(PipelineOutcome::error(
                    run_id,
                    format!("Native process failed: {}", native.stderr),
                    Vec::new(),
                ));
            }

            self.runner
                .run(run_id, &self.plan.scripts, &self.plan.work_dir)
                .await
        }
        .instrument(span)
        .await
    }
}
