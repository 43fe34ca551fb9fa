//! Span extraction evaluation.
//!
//! Scores the spans produced by executing learned rules against gold
//! annotations. Everything here is a pure function over literal span lists:
//! no shared state, no I/O, safe to call from any number of threads.
//!
//! # Components
//!
//! - **span**: IoU, boundary distance and best-match lookup
//! - **matching**: greedy exact-then-partial matching into [`SpanMetrics`]
//! - **corpus**: micro-averaged aggregation over many documents
//! - **report**: plain-text rendering of a metrics record
//!
//! # Usage
//!
//! ```rust
//! use rulechef_core::evaluation::{evaluate_spans, Span};
//!
//! let predictions = vec![Span::new("A", 0, 1)];
//! let gold = vec![Span::new("A", 0, 1), Span::new("B", 2, 3)];
//!
//! let metrics = evaluate_spans(&predictions, &gold, false, 0.5);
//! assert_eq!(metrics.exact_matches, 1);
//! assert_eq!(metrics.recall, 0.5);
//! ```

pub mod corpus;
pub mod matching;
pub mod report;
pub mod span;

pub use corpus::{CorpusMetrics, LabeledDocument};
pub use matching::{evaluate_spans, BoundaryError, SpanMetrics, DEFAULT_IOU_THRESHOLD};
pub use report::{EvaluationReport, DEFAULT_REPORT_SAMPLES};
pub use span::{boundary_distance, find_best_match, span_iou, Span};
