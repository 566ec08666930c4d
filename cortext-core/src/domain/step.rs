//! Step domain types
//!
//! A step is one external program invocation, treated as an opaque unit of
//! work. Steps are described as structured argument lists and executed
//! without a shell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a step is launched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepCommand {
    /// Program plus argv, spawned directly. No quoting or expansion happens.
    Exec { program: String, args: Vec<String> },
    /// A command line handed to `sh -c`.
    ///
    /// Trust boundary: the line is interpreted by the shell, so it must only
    /// ever come from operator configuration, never from request data.
    Shell { line: String },
}

impl StepCommand {
    /// Creates a direct-exec step
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StepCommand::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a step from an argv vector (`argv[0]` is the program)
    ///
    /// Returns None when argv is empty.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(StepCommand::Exec {
            program,
            args: iter.collect(),
        })
    }

    /// Creates a shell step. See [`StepCommand::Shell`].
    pub fn shell(line: impl Into<String>) -> Self {
        StepCommand::Shell { line: line.into() }
    }

    /// The program that will be spawned
    pub fn program(&self) -> &str {
        match self {
            StepCommand::Exec { program, .. } => program,
            StepCommand::Shell { .. } => "sh",
        }
    }
}

/// Renders the step the way an operator would type it, e.g.
/// `python3 CORTEXT_LAYOUT_10K.py 40`. Used for results and log lines only.
impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCommand::Exec { program, args } => {
                f.write_str(program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            StepCommand::Shell { line } => f.write_str(line),
        }
    }
}

/// Outcome of one executed step
///
/// Produced once by the executor and never mutated. A non-zero
/// `exit_code` is a normal value here, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    #[serde(rename = "script")]
    pub command: String,
    #[serde(rename = "returncode")]
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_seconds: f64,
}

impl StepResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
