//! Greedy span matching and per-document metrics.
//!
//! Predictions are consumed in input order. Each one first claims the first
//! unmatched gold span with identical text and offsets; failing that (and
//! unless exact matching is required) it claims its best-overlapping gold span
//! if that span is still free. The result depends on prediction order and is
//! not a globally optimal assignment.

use serde::{Deserialize, Serialize};

use super::span::{boundary_distance, find_best_match, Span};

/// Default IoU needed for a partial match
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// One partial match, kept for error analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryError {
    pub predicted: Span,
    pub gold: Span,
    pub distance: i64,
    pub iou: f64,
}

/// Span extraction metrics for one prediction/gold pair of lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanMetrics {
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy_exact: f64,
    pub accuracy_partial: f64,
    pub boundary_errors: Vec<BoundaryError>,
}

impl SpanMetrics {
    /// No false positives and no false negatives
    pub fn is_fully_correct(&self) -> bool {
        self.false_positives == 0 && self.false_negatives == 0
    }
}

pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub(crate) fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Score `predictions` against `gold`.
pub fn evaluate_spans(
    predictions: &[Span],
    gold: &[Span],
    exact_match_only: bool,
    iou_threshold: f64,
) -> SpanMetrics {
    if gold.is_empty() {
        return SpanMetrics {
            false_positives: predictions.len(),
            ..SpanMetrics::default()
        };
    }

    let mut matched = vec![false; gold.len()];
    let mut exact_matches = 0;
    let mut partial_matches = 0;
    let mut boundary_errors = Vec::new();

    for pred in predictions {
        let exact = gold
            .iter()
            .enumerate()
            .find(|(idx, g)| !matched[*idx] && pred.matches_exactly(g))
            .map(|(idx, _)| idx);

        if let Some(idx) = exact {
            matched[idx] = true;
            exact_matches += 1;
            continue;
        }

        if exact_match_only {
            continue;
        }

        // Best match is taken over the full list; a consumed best means no match.
        if let Some((idx, iou)) = find_best_match(pred, gold, iou_threshold) {
            if !matched[idx] {
                matched[idx] = true;
                partial_matches += 1;
                boundary_errors.push(BoundaryError {
                    predicted: pred.clone(),
                    gold: gold[idx].clone(),
                    distance: boundary_distance(pred, &gold[idx]),
                    iou,
                });
            }
        }
    }

    let true_positives = exact_matches + partial_matches;
    let false_positives = predictions.len() - true_positives;
    let false_negatives = matched.iter().filter(|m| !**m).count();

    let precision = ratio(true_positives, true_positives + false_positives);
    let recall = ratio(true_positives, true_positives + false_negatives);

    SpanMetrics {
        exact_matches,
        partial_matches,
        true_positives,
        false_positives,
        false_negatives,
        precision,
        recall,
        f1: harmonic_mean(precision, recall),
        accuracy_exact: ratio(exact_matches, gold.len()),
        accuracy_partial: ratio(true_positives, gold.len()),
        boundary_errors,
    }
}
