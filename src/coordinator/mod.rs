//! Learning coordination: when to learn, with which strategy and budget.
//!
//! The orchestrator talks to a [`Coordinator`] trait object, so the policy is
//! swappable without touching callers:
//!
//! - **HeuristicCoordinator**: deterministic thresholds on new examples and
//!   corrections
//! - **AgenticCoordinator**: placeholder for LLM-driven decisions; every call
//!   returns `NotImplemented`
//!
//! Coordinators only read the buffer (through `get_stats`) and never mutate
//! it; advancing the learn cursor is the orchestrator's job.

pub mod agentic;
pub mod decision;
pub mod heuristic;

pub use agentic::AgenticCoordinator;
pub use decision::{BufferAnalysis, CoordinationDecision, LearningMetrics, LearningStrategy};
pub use heuristic::{HeuristicCoordinator, DEFAULT_CORRECTION_THRESHOLD, DEFAULT_TRIGGER_THRESHOLD};

use crate::buffer::ExampleBuffer;
use crate::config::{CoordinatorConfig, CoordinatorKind};
use crate::error::Result;
use crate::types::Rule;

/// Policy deciding when rules should be (re)learned
pub trait Coordinator: Send + Sync {
    /// Coordinator name (for logging)
    fn name(&self) -> &str;

    /// Decide if learning should be triggered now.
    ///
    /// `current_rules` is `None` before the first successful learn.
    fn should_trigger_learning(
        &self,
        buffer: &ExampleBuffer,
        current_rules: Option<&[Rule]>,
    ) -> Result<CoordinationDecision>;

    /// Buffer statistics plus readiness flags (diagnostic, read-only)
    fn analyze_buffer(&self, buffer: &ExampleBuffer) -> Result<BufferAnalysis>;

    /// Called after a learning run; `old_rules` is `None` after the first learn
    fn on_learning_complete(
        &self,
        old_rules: Option<&[Rule]>,
        new_rules: &[Rule],
        metrics: &LearningMetrics,
    ) -> Result<()>;
}

/// Build the coordinator selected in configuration
pub fn build_coordinator(config: &CoordinatorConfig) -> Result<Box<dyn Coordinator>> {
    config.validate()?;

    match config.kind {
        CoordinatorKind::Heuristic => Ok(Box::new(HeuristicCoordinator::from_config(config))),
        CoordinatorKind::Agentic => Ok(Box::new(AgenticCoordinator::new("default")?)),
    }
}
