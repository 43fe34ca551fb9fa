//! Core data types for the RuleChef coordination core
//!
//! This module defines the values that flow between producers, the example
//! buffer, coordinators and the learning cycle: observed examples, their
//! sources, and the (opaque) learned rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured, string-keyed payload (example inputs and outputs)
pub type Record = Map<String, Value>;

/// Open side-channel mapping; decision logic never branches on it
pub type Metadata = Map<String, Value>;

/// Where an observed example came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleSource {
    /// Passively observed from an LLM call
    Llm,

    /// Supplied by a person (labels or corrections)
    Human,
}

impl std::fmt::Display for ExampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExampleSource::Llm => write!(f, "llm"),
            ExampleSource::Human => write!(f, "human"),
        }
    }
}

/// An input/output pair seen by the system
///
/// Immutable once created. For corrections the `output` holds both the
/// `expected` and the `actual` (wrong) results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedExample {
    pub input: Record,
    pub output: Record,
    pub source: ExampleSource,
    pub is_correction: bool,
    pub timestamp: DateTime<Utc>,
    pub metadata: Metadata,
}

impl ObservedExample {
    /// Example observed from an LLM interaction
    pub fn llm(input: Record, output: Record, metadata: Metadata) -> Self {
        Self {
            input,
            output,
            source: ExampleSource::Llm,
            is_correction: false,
            timestamp: Utc::now(),
            metadata,
        }
    }

    /// Human-labeled example
    pub fn human(input: Record, output: Record) -> Self {
        Self {
            input,
            output,
            source: ExampleSource::Human,
            is_correction: false,
            timestamp: Utc::now(),
            metadata: Metadata::new(),
        }
    }

    /// Human correction of a model output
    pub fn correction(input: Record, expected: Record, actual: Record) -> Self {
        let mut output = Record::new();
        output.insert("expected".to_string(), Value::Object(expected));
        output.insert("actual".to_string(), Value::Object(actual));

        Self {
            input,
            output,
            source: ExampleSource::Human,
            is_correction: true,
            timestamp: Utc::now(),
            metadata: Metadata::new(),
        }
    }

    /// Expected result of a correction
    pub fn expected(&self) -> Option<&Record> {
        if !self.is_correction {
            return None;
        }
        self.output.get("expected").and_then(Value::as_object)
    }

    /// Actual (wrong) result of a correction
    pub fn actual(&self) -> Option<&Record> {
        if !self.is_correction {
            return None;
        }
        self.output.get("actual").and_then(Value::as_object)
    }
}

/// How a rule's `content` is meant to be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFormat {
    Regex,
    Code,
}

/// A learned extraction rule
///
/// The core treats rules as read-only values; it never interprets `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub format: RuleFormat,
    pub content: String,

    /// Higher runs first (1-10)
    pub priority: u8,

    /// Synthesizer's confidence in the rule (0.0-1.0)
    pub confidence: f32,
}
