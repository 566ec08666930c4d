//! Service layer
//!
//! The fail-fast pipeline runner and the two-phase orchestrator built on it.
//! Both depend on the [`StepExecutor`](crate::executor::StepExecutor) trait
//! so tests can swap in a recording executor.

mod orchestrator;
mod pipeline;

#[cfg(test)]
pub(crate) mod fake;

pub use orchestrator::{Orchestrator, PhasePlan};
pub use pipeline::PipelineRunner;
