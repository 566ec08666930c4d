//! In-memory executor for tests

use async_trait::async_trait;
use cortext_core::domain::step::{StepCommand, StepResult};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use crate::executor::{ExecutorError, StepExecutor};

/// Records every command it is asked to run and answers with scripted
/// exit codes, keyed by program name. Unknown programs exit 0.
#[derive(Default)]
pub struct RecordingExecutor {
    exit_codes: HashMap<String, i32>,
    launch_failures: HashSet<String>,
    invocations: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    pub fn with_launch_failure(mut self, program: &str) -> Self {
        self.launch_failures.insert(program.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepExecutor for RecordingExecutor {
    async fn execute(
        &self,
        step: &StepCommand,
        _work_dir: &Path,
    ) -> Result<StepResult, ExecutorError> {
        let rendered = step.to_string();
        self.invocations.lock().unwrap().push(rendered.clone());

        if self.launch_failures.contains(step.program()) {
            return Err(ExecutorError::Launch {
                command: rendered,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        let exit_code = self.exit_codes.get(step.program()).copied().unwrap_or(0);
        Ok(StepResult {
            command: rendered,
            exit_code,
            stdout: String::new(),
            stderr: if exit_code == 0 {
                String::new()
            } else {
                format!("{} exploded", step.program())
            },
            duration_seconds: 0.0,
        })
    }
}
