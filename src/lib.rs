//! RuleChef - Coordination core for adaptive rule learning
//!
//! Decides *when* extraction rules should be relearned from accumulated
//! examples, *which* sampling strategy and iteration budget to use, and *how
//! well* the resulting rules perform:
//! - Concurrency-safe multi-source example buffer with a learn cursor
//! - Swappable learning coordinators (deterministic heuristic, agentic placeholder)
//! - Span-matching evaluation (IoU, greedy matching, precision/recall/F1)
//!
//! Rule synthesis and rule execution stay outside this crate; the learning
//! cycle reaches them through the [`RuleSynthesizer`] and [`SpanExtractor`]
//! traits.
//!
//! # Architecture
//!
//! - **Types**: observed examples, sources, rules
//! - **Buffer**: append-only example log shared between producers
//! - **Coordinator**: learning-decision policies
//! - **Evaluation**: span scoring, corpus aggregation, reports
//! - **Cycle**: decide -> synthesize -> evaluate -> report -> mark learned
//!
//! # Example
//!
//! ```rust
//! use rulechef_core::{Coordinator, ExampleBuffer, HeuristicCoordinator, LearningStrategy};
//! use serde_json::json;
//!
//! let buffer = ExampleBuffer::new();
//! let coordinator = HeuristicCoordinator::new(2, 10);
//!
//! for text in ["Apple Inc. in Cupertino", "Tim Cook presented"] {
//!     let input = json!({ "text": text }).as_object().cloned().unwrap();
//!     let output = json!({ "spans": [] }).as_object().cloned().unwrap();
//!     buffer.add_human_example(input, output);
//! }
//!
//! let decision = coordinator.should_trigger_learning(&buffer, None)?;
//! assert!(decision.should_learn);
//! assert_eq!(decision.strategy, LearningStrategy::Balanced);
//! # Ok::<(), rulechef_core::RuleChefError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod coordinator;
pub mod cycle;
pub mod error;
pub mod evaluation;
pub mod types;

// Re-export commonly used types
pub use buffer::{BufferStats, ExampleBuffer};
pub use config::{ConfigError, CoordinatorConfig, CoordinatorKind, RuleChefConfig};
pub use coordinator::{
    build_coordinator, AgenticCoordinator, BufferAnalysis, CoordinationDecision, Coordinator,
    HeuristicCoordinator, LearningMetrics, LearningStrategy,
};
pub use cycle::{CycleOutcome, CycleReport, LearningCycle, RuleSynthesizer, SpanExtractor, SynthesisRequest};
pub use error::{Result, RuleChefError};
pub use evaluation::{evaluate_spans, CorpusMetrics, EvaluationReport, LabeledDocument, Span, SpanMetrics};
pub use types::{ExampleSource, Metadata, ObservedExample, Record, Rule, RuleFormat};
