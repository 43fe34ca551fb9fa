//! Corpus-level aggregation of per-document span metrics.

use serde::{Deserialize, Serialize};

use super::matching::{evaluate_spans, harmonic_mean, ratio, SpanMetrics};
use super::span::Span;

/// A held-out document with its gold annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub text: String,
    pub gold: Vec<Span>,
}

impl LabeledDocument {
    pub fn new(text: impl Into<String>, gold: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            gold,
        }
    }

    /// Build gold spans by locating each entity string in `text`.
    /// Entities that do not occur are skipped.
    pub fn from_entities(text: impl Into<String>, entities: &[&str]) -> Self {
        let text = text.into();
        let gold = entities
            .iter()
            .filter_map(|entity| Span::find(&text, entity))
            .collect();
        Self { text, gold }
    }
}

/// Micro-averaged metrics over many documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetrics {
    pub documents: usize,
    pub fully_correct_documents: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub total_predictions: usize,
    pub total_gold: usize,
}

impl CorpusMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's result in
    pub fn add(&mut self, metrics: &SpanMetrics, predictions: usize, gold: usize) {
        self.documents += 1;
        if metrics.is_fully_correct() {
            self.fully_correct_documents += 1;
        }
        self.exact_matches += metrics.exact_matches;
        self.partial_matches += metrics.partial_matches;
        self.true_positives += metrics.true_positives;
        self.false_positives += metrics.false_positives;
        self.false_negatives += metrics.false_negatives;
        self.total_predictions += predictions;
        self.total_gold += gold;
    }

    /// Evaluate one document and fold it in, returning its own metrics
    pub fn evaluate_document(
        &mut self,
        predictions: &[Span],
        gold: &[Span],
        exact_match_only: bool,
        iou_threshold: f64,
    ) -> SpanMetrics {
        let metrics = evaluate_spans(predictions, gold, exact_match_only, iou_threshold);
        self.add(&metrics, predictions.len(), gold.len());
        metrics
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        harmonic_mean(self.precision(), self.recall())
    }

    pub fn accuracy_exact(&self) -> f64 {
        ratio(self.exact_matches, self.total_gold)
    }

    pub fn accuracy_partial(&self) -> f64 {
        ratio(self.true_positives, self.total_gold)
    }

    /// Share of documents with no false positives or negatives
    pub fn document_accuracy(&self) -> f64 {
        ratio(self.fully_correct_documents, self.documents)
    }
}
