//! LLM-driven coordinator placeholder.
//!
//! Intended to analyze buffer patterns, choose the sampling strategy from the
//! data and size the iteration budget from learning progress. Until then every
//! entry point, construction included, fails with
//! [`RuleChefError::NotImplemented`]; it is never a stand-in for
//! [`HeuristicCoordinator`](super::HeuristicCoordinator).

use super::decision::{BufferAnalysis, CoordinationDecision, LearningMetrics};
use super::Coordinator;
use crate::buffer::ExampleBuffer;
use crate::error::{Result, RuleChefError};
use crate::types::Rule;

#[derive(Debug)]
pub struct AgenticCoordinator {
    model: String,
}

impl AgenticCoordinator {
    /// Always fails: use `HeuristicCoordinator` for now
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        Err(RuleChefError::not_implemented(format!(
            "AgenticCoordinator (model '{}') is not available yet; use HeuristicCoordinator",
            model
        )))
    }
}

impl Coordinator for AgenticCoordinator {
    fn name(&self) -> &str {
        &self.model
    }

    fn should_trigger_learning(
        &self,
        _buffer: &ExampleBuffer,
        _current_rules: Option<&[Rule]>,
    ) -> Result<CoordinationDecision> {
        Err(RuleChefError::not_implemented(
            "AgenticCoordinator::should_trigger_learning",
        ))
    }

    fn analyze_buffer(&self, _buffer: &ExampleBuffer) -> Result<BufferAnalysis> {
        Err(RuleChefError::not_implemented(
            "AgenticCoordinator::analyze_buffer",
        ))
    }

    fn on_learning_complete(
        &self,
        _old_rules: Option<&[Rule]>,
        _new_rules: &[Rule],
        _metrics: &LearningMetrics,
    ) -> Result<()> {
        Err(RuleChefError::not_implemented(
            "AgenticCoordinator::on_learning_complete",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_fails() {
        let err = AgenticCoordinator::new("claude-haiku").unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("HeuristicCoordinator"));
    }

    #[test]
    fn test_every_operation_fails() {
        // Bypass the constructor to reach the trait methods.
        let coordinator = AgenticCoordinator {
            model: "test".to_string(),
        };
        let buffer = ExampleBuffer::new();

        assert!(coordinator
            .should_trigger_learning(&buffer, None)
            .unwrap_err()
            .is_not_implemented());
        assert!(coordinator
            .analyze_buffer(&buffer)
            .unwrap_err()
            .is_not_implemented());
        assert!(coordinator
            .on_learning_complete(None, &[], &LearningMetrics::default())
            .unwrap_err()
            .is_not_implemented());
    }
}
