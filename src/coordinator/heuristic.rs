//! Deterministic threshold-based coordinator.
//!
//! - First learn: trigger after N new examples
//! - Later: trigger after N new examples OR M new corrections
//! - Strategy: corrections_first when corrections triggered, else diversity

use serde_json::{json, Value};
use tracing::{debug, info};

use super::decision::{BufferAnalysis, CoordinationDecision, LearningMetrics, LearningStrategy};
use super::Coordinator;
use crate::buffer::{BufferStats, ExampleBuffer};
use crate::config::CoordinatorConfig;
use crate::error::Result;
use crate::types::{Metadata, Rule};

pub const DEFAULT_TRIGGER_THRESHOLD: usize = 50;
pub const DEFAULT_CORRECTION_THRESHOLD: usize = 10;

/// Iteration budget for fresh learning and diversity refinement
const FULL_ITERATIONS: u32 = 3;

/// Corrections are targeted fixes and converge faster
const CORRECTION_ITERATIONS: u32 = 2;

/// Threshold-driven coordinator; its thresholds are its only state
#[derive(Debug, Clone)]
pub struct HeuristicCoordinator {
    trigger_threshold: usize,
    correction_threshold: usize,
}

impl Default for HeuristicCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_THRESHOLD, DEFAULT_CORRECTION_THRESHOLD)
    }
}

impl HeuristicCoordinator {
    pub fn new(trigger_threshold: usize, correction_threshold: usize) -> Self {
        Self {
            trigger_threshold,
            correction_threshold,
        }
    }

    pub fn from_config(config: &CoordinatorConfig) -> Self {
        Self::new(config.trigger_threshold, config.correction_threshold)
    }

    pub fn trigger_threshold(&self) -> usize {
        self.trigger_threshold
    }

    pub fn correction_threshold(&self) -> usize {
        self.correction_threshold
    }

    fn enough_examples(&self, stats: &BufferStats) -> bool {
        stats.new_examples >= self.trigger_threshold
    }

    fn enough_corrections(&self, stats: &BufferStats) -> bool {
        stats.new_corrections >= self.correction_threshold
    }

    fn decision_metadata(&self, stats: &BufferStats) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(
            "buffer_stats".to_string(),
            serde_json::to_value(stats).unwrap_or(Value::Null),
        );
        metadata.insert("trigger_threshold".to_string(), json!(self.trigger_threshold));
        metadata.insert(
            "correction_threshold".to_string(),
            json!(self.correction_threshold),
        );
        metadata
    }
}

impl Coordinator for HeuristicCoordinator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn should_trigger_learning(
        &self,
        buffer: &ExampleBuffer,
        current_rules: Option<&[Rule]>,
    ) -> Result<CoordinationDecision> {
        let stats = buffer.get_stats();
        let examples = stats.new_examples;
        let corrections = stats.new_corrections;

        let (should_learn, strategy, max_iterations, reasoning) = if current_rules.is_none() {
            (
                self.enough_examples(&stats),
                LearningStrategy::Balanced,
                FULL_ITERATIONS,
                format!(
                    "First learn: {}/{} examples",
                    examples, self.trigger_threshold
                ),
            )
        } else if self.enough_corrections(&stats) {
            // Checked before the example count: corrections win even when both fire.
            (
                true,
                LearningStrategy::CorrectionsFirst,
                CORRECTION_ITERATIONS,
                format!(
                    "Corrections accumulated: {}/{}",
                    corrections, self.correction_threshold
                ),
            )
        } else if self.enough_examples(&stats) {
            (
                true,
                LearningStrategy::Diversity,
                FULL_ITERATIONS,
                format!(
                    "Examples accumulated: {}/{}",
                    examples, self.trigger_threshold
                ),
            )
        } else {
            (
                false,
                LearningStrategy::Balanced,
                FULL_ITERATIONS,
                format!(
                    "Not ready: {}/{} examples, {}/{} corrections",
                    examples, self.trigger_threshold, corrections, self.correction_threshold
                ),
            )
        };

        if should_learn {
            info!(
                "Coordinator decision: {} (strategy: {}, max iterations: {})",
                reasoning, strategy, max_iterations
            );
        } else {
            debug!("Coordinator decision: {}", reasoning);
        }

        Ok(CoordinationDecision {
            should_learn,
            strategy,
            reasoning,
            max_iterations,
            metadata: self.decision_metadata(&stats),
        })
    }

    fn analyze_buffer(&self, buffer: &ExampleBuffer) -> Result<BufferAnalysis> {
        let stats = buffer.get_stats();
        Ok(BufferAnalysis {
            stats,
            ready_for_first_learn: self.enough_examples(&stats),
            ready_for_refinement: self.enough_examples(&stats) || self.enough_corrections(&stats),
        })
    }

    fn on_learning_complete(
        &self,
        old_rules: Option<&[Rule]>,
        new_rules: &[Rule],
        metrics: &LearningMetrics,
    ) -> Result<()> {
        let phase = if old_rules.is_none() {
            "Initial learning complete"
        } else {
            "Refinement complete"
        };

        if metrics.total > 0 {
            info!(
                "{}: {} rules, accuracy {:.1}% ({}/{})",
                phase,
                new_rules.len(),
                metrics.accuracy * 100.0,
                metrics.correct,
                metrics.total
            );
        } else {
            info!("{}: {} rules", phase, new_rules.len());
        }

        Ok(())
    }
}
