//! Example buffer for observed LLM and human interactions.
//!
//! Append-only log shared between any number of producers and a single
//! coordinating consumer. A cursor (`last_learn_index`) separates examples
//! already considered for learning from new ones.
//!
//! Every operation runs inside one short critical section; nothing here does
//! I/O, so callers never need timeouts or cancellation.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::types::{ExampleSource, Metadata, ObservedExample, Record};

/// Buffer statistics, computed under the lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferStats {
    /// Every example ever appended (since the last clear)
    pub total_examples: usize,

    /// Examples after the learn cursor
    pub new_examples: usize,

    /// New examples that are corrections
    pub new_corrections: usize,

    /// New LLM observations
    pub llm_observations: usize,

    /// New human-labeled examples (corrections excluded)
    pub human_examples: usize,
}

#[derive(Debug, Default)]
struct BufferState {
    examples: Vec<ObservedExample>,
    last_learn_index: usize,
}

impl BufferState {
    fn new_slice(&self) -> &[ObservedExample] {
        &self.examples[self.last_learn_index..]
    }
}

/// Thread-safe buffer for incoming examples from multiple sources
#[derive(Debug, Default)]
pub struct ExampleBuffer {
    state: Mutex<BufferState>,
}

impl ExampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock can only happen between complete
    // operations, so the state behind a poisoned lock is still valid.
    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, example: ObservedExample) {
        let source = example.source;
        let is_correction = example.is_correction;

        let total = {
            let mut state = self.lock();
            state.examples.push(example);
            state.examples.len()
        };

        debug!(
            "Buffered {} example (correction: {}), total {}",
            source, is_correction, total
        );
    }

    /// Add example observed from an LLM interaction
    pub fn add_llm_observation(&self, input: Record, output: Record, metadata: Option<Metadata>) {
        self.push(ObservedExample::llm(input, output, metadata.unwrap_or_default()));
    }

    /// Add human-labeled example
    pub fn add_human_example(&self, input: Record, output: Record) {
        self.push(ObservedExample::human(input, output));
    }

    /// Add human correction of model output
    pub fn add_human_correction(&self, input: Record, expected: Record, actual: Record) {
        self.push(ObservedExample::correction(input, expected, actual));
    }

    /// Copy of every buffered example
    pub fn get_all_examples(&self) -> Vec<ObservedExample> {
        self.lock().examples.clone()
    }

    /// Copy of the examples added since the last `mark_learned`
    pub fn get_new_examples(&self) -> Vec<ObservedExample> {
        self.lock().new_slice().to_vec()
    }

    /// New examples plus the log length they end at, taken under one lock.
    ///
    /// Pair with [`mark_learned_through`](Self::mark_learned_through) so
    /// examples appended after the snapshot stay new.
    pub fn snapshot_new_examples(&self) -> (Vec<ObservedExample>, usize) {
        let state = self.lock();
        (state.new_slice().to_vec(), state.examples.len())
    }

    /// Corrections added since the last `mark_learned`
    pub fn get_new_corrections(&self) -> Vec<ObservedExample> {
        self.get_new_examples()
            .into_iter()
            .filter(|e| e.is_correction)
            .collect()
    }

    /// Move the learn cursor to the end of the log
    pub fn mark_learned(&self) {
        let mut state = self.lock();
        let previous = state.last_learn_index;
        state.last_learn_index = state.examples.len();
        debug!(
            "Learn cursor moved {} -> {}",
            previous, state.last_learn_index
        );
    }

    /// Move the learn cursor to `end`, a log length from an earlier snapshot.
    ///
    /// Never moves the cursor backwards or past the end of the log. Returns
    /// how many examples remain after the cursor.
    pub fn mark_learned_through(&self, end: usize) -> usize {
        let mut state = self.lock();
        let previous = state.last_learn_index;
        let target = end.min(state.examples.len()).max(previous);
        state.last_learn_index = target;
        debug!("Learn cursor moved {} -> {}", previous, target);
        state.examples.len() - target
    }

    pub fn get_stats(&self) -> BufferStats {
        let state = self.lock();
        let new_examples = state.new_slice();

        let mut stats = BufferStats {
            total_examples: state.examples.len(),
            new_examples: new_examples.len(),
            ..BufferStats::default()
        };

        for example in new_examples {
            match (example.source, example.is_correction) {
                (_, true) => stats.new_corrections += 1,
                (ExampleSource::Llm, false) => stats.llm_observations += 1,
                (ExampleSource::Human, false) => stats.human_examples += 1,
            }
        }

        stats
    }

    /// Number of buffered examples
    pub fn len(&self) -> usize {
        self.lock().examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().examples.is_empty()
    }

    /// Drop every example and reset the cursor.
    ///
    /// Dangerous: anything not yet learned from is lost.
    pub fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.examples.len();
        state.examples.clear();
        state.last_learn_index = 0;
        warn!("Example buffer cleared ({} examples dropped)", dropped);
    }
}
