//! Values exchanged between coordinators and the orchestrator.

use serde::{Deserialize, Serialize};

use crate::buffer::BufferStats;
use crate::evaluation::CorpusMetrics;
use crate::types::Metadata;

/// Sampling strategy handed to the rule synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStrategy {
    /// Even mix of all buffered examples
    Balanced,

    /// Favor examples unlike the ones current rules already cover
    Diversity,

    /// Start from human corrections, then fill with other examples
    CorrectionsFirst,
}

impl LearningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStrategy::Balanced => "balanced",
            LearningStrategy::Diversity => "diversity",
            LearningStrategy::CorrectionsFirst => "corrections_first",
        }
    }
}

impl std::fmt::Display for LearningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of coordinator analysis: whether, how and why to learn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinationDecision {
    pub should_learn: bool,
    pub strategy: LearningStrategy,

    /// Human-readable explanation
    pub reasoning: String,

    /// Refinement budget for the synthesizer (always >= 1)
    pub max_iterations: u32,

    /// Buffer stats snapshot and thresholds used
    pub metadata: Metadata,
}

/// Buffer stats plus readiness flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferAnalysis {
    #[serde(flatten)]
    pub stats: BufferStats,
    pub ready_for_first_learn: bool,
    pub ready_for_refinement: bool,
}

/// Outcome of a learning run, reported to `on_learning_complete`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningMetrics {
    /// `correct / total`, 0 when nothing was evaluated
    pub accuracy: f64,

    /// Evaluated documents
    pub total: usize,

    /// Documents extracted without any error
    pub correct: usize,

    /// Span-level detail, when an evaluation was run
    pub spans: Option<CorpusMetrics>,
}

impl LearningMetrics {
    pub fn from_corpus(corpus: CorpusMetrics) -> Self {
        Self {
            accuracy: corpus.document_accuracy(),
            total: corpus.documents,
            correct: corpus.fully_correct_documents,
            spans: Some(corpus),
        }
    }
}
