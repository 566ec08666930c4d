//! Cortext Runner
//!
//! Executes the external text-processing pipeline.
//!
//! Architecture:
//! - Executor: runs one step as an OS process and captures its result
//! - Services: the fail-fast sequential runner and the two-phase
//!   orchestrator (native executable, then the scripted sequence)
//!
//! Every step waits for its process to exit. There is no timeout, no
//! cancellation and no retry.

pub mod executor;
pub mod service;

pub use executor::{ExecutorError, ProcessExecutor, StepExecutor};
pub use service::{Orchestrator, PhasePlan, PipelineRunner};
