//! Shared router state

use cortext_runner::{Orchestrator, ProcessExecutor, StepExecutor};
use std::sync::Arc;

use crate::config::Config;

/// State handed to every handler
///
/// Read-only after startup. Concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Builds state that launches real processes
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Arc::new(ProcessExecutor::new()))
    }

    /// Builds state around a custom executor
    pub fn with_executor(config: Config, executor: Arc<dyn StepExecutor>) -> Self {
        let orchestrator = Orchestrator::new(executor, config.phase_plan());
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
