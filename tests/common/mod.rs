//! Common test utilities and helpers

#![allow(dead_code)]

use once_cell::sync::Lazy;
use rulechef_core::{ExampleBuffer, Record, Span};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
});

/// Install a test subscriber once per test binary (RUST_LOG overrides the filter)
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Turn a `json!` object literal into a record
pub fn record(value: Value) -> Record {
    value
        .as_object()
        .cloned()
        .expect("test record must be a JSON object")
}

pub fn span(text: &str, start: i64, end: i64) -> Span {
    Span::new(text, start, end)
}

/// Append `n` LLM observations
pub fn add_llm_observations(buffer: &ExampleBuffer, n: usize) {
    for i in 0..n {
        buffer.add_llm_observation(
            record(serde_json::json!({ "text": format!("observed {}", i) })),
            record(serde_json::json!({ "spans": [] })),
            None,
        );
    }
}

/// Append `n` human corrections
pub fn add_corrections(buffer: &ExampleBuffer, n: usize) {
    for i in 0..n {
        buffer.add_human_correction(
            record(serde_json::json!({ "text": format!("corrected {}", i) })),
            record(serde_json::json!({ "spans": [{ "text": "x", "start": 0, "end": 1 }] })),
            record(serde_json::json!({ "spans": [] })),
        );
    }
}
