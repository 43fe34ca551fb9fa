//! Plain-text evaluation report.

use std::fmt;

use super::matching::{SpanMetrics, DEFAULT_IOU_THRESHOLD};
use crate::config::EvaluationConfig;

const RULE_WIDTH: usize = 70;

/// Boundary errors shown by default
pub const DEFAULT_REPORT_SAMPLES: usize = 5;

/// Renders a [`SpanMetrics`] as a titled report via `Display`
pub struct EvaluationReport<'a> {
    dataset_name: &'a str,
    metrics: &'a SpanMetrics,
    iou_threshold: f64,
    samples: usize,
}

impl<'a> EvaluationReport<'a> {
    pub fn new(dataset_name: &'a str, metrics: &'a SpanMetrics) -> Self {
        Self {
            dataset_name,
            metrics,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            samples: DEFAULT_REPORT_SAMPLES,
        }
    }

    /// Report using the `[evaluation]` settings the metrics were computed with
    pub fn from_config(
        dataset_name: &'a str,
        metrics: &'a SpanMetrics,
        config: &EvaluationConfig,
    ) -> Self {
        Self::new(dataset_name, metrics)
            .with_iou_threshold(config.iou_threshold)
            .with_samples(config.report_samples)
    }

    /// Threshold quoted next to the partial accuracy line
    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// Number of boundary errors to list
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

impl fmt::Display for EvaluationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        let banner = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", banner)?;
        writeln!(f, "EVALUATION REPORT: {}", self.dataset_name)?;
        writeln!(f, "{}", banner)?;
        writeln!(f)?;

        section(f, "SPAN EXTRACTION METRICS")?;
        writeln!(f, "Exact Match Accuracy:    {}", percent(m.accuracy_exact))?;
        writeln!(
            f,
            "Partial Match Accuracy:  {} (IoU >= {:.2})",
            percent(m.accuracy_partial),
            self.iou_threshold
        )?;
        writeln!(f)?;

        section(f, "DETAILED METRICS")?;
        writeln!(f, "Precision: {}", percent(m.precision))?;
        writeln!(f, "Recall:    {}", percent(m.recall))?;
        writeln!(f, "F1 Score:  {}", percent(m.f1))?;
        writeln!(f)?;

        section(f, "CONFUSION")?;
        writeln!(f, "True Positives:  {}", m.true_positives)?;
        writeln!(f, "False Positives: {}", m.false_positives)?;
        writeln!(f, "False Negatives: {}", m.false_negatives)?;
        writeln!(f)?;

        if !m.boundary_errors.is_empty() && self.samples > 0 {
            section(f, "BOUNDARY ERRORS (Sample)")?;
            for error in m.boundary_errors.iter().take(self.samples) {
                writeln!(f, "Predicted: {}", error.predicted)?;
                writeln!(f, "Gold:      {}", error.gold)?;
                writeln!(
                    f,
                    "Boundary offset: ±{} chars, IoU: {:.2}",
                    error.distance, error.iou
                )?;
                writeln!(f)?;
            }
        }

        writeln!(f, "{}", banner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleChefConfig;
    use crate::evaluation::{evaluate_spans, Span};

    #[test]
    fn test_report_contains_rates_and_counts() {
        let predictions = vec![Span::new("A", 0, 1)];
        let gold = vec![Span::new("A", 0, 1), Span::new("B", 2, 3)];
        let metrics = evaluate_spans(&predictions, &gold, false, 0.5);

        let text = EvaluationReport::new("toy", &metrics).to_string();
        assert!(text.contains("EVALUATION REPORT: toy"));
        assert!(text.contains("Recall:    50.0%"));
        assert!(text.contains("False Negatives: 1"));
        assert!(!text.contains("BOUNDARY ERRORS"));
    }

    #[test]
    fn test_report_limits_boundary_samples() {
        let predictions: Vec<Span> = (0..4).map(|i| Span::new("x", i * 10, i * 10 + 9)).collect();
        let gold: Vec<Span> = (0..4).map(|i| Span::new("y", i * 10, i * 10 + 10)).collect();
        let metrics = evaluate_spans(&predictions, &gold, false, 0.5);
        assert_eq!(metrics.boundary_errors.len(), 4);

        let text = EvaluationReport::new("ner", &metrics)
            .with_samples(2)
            .to_string();
        assert_eq!(text.matches("Boundary offset").count(), 2);
        assert!(text.contains("IoU: 0.90"));
    }

    #[test]
    fn test_report_follows_evaluation_config() {
        let config = RuleChefConfig::from_toml(
            r#"
            [evaluation]
            iou_threshold = 0.75
            report_samples = 2
            "#,
        )
        .unwrap();

        let predictions: Vec<Span> = (0..4).map(|i| Span::new("x", i * 10, i * 10 + 9)).collect();
        let gold: Vec<Span> = (0..4).map(|i| Span::new("y", i * 10, i * 10 + 10)).collect();
        let eval = &config.evaluation;
        let metrics = evaluate_spans(&predictions, &gold, eval.exact_match_only, eval.iou_threshold);
        assert_eq!(metrics.boundary_errors.len(), 4);

        let text = EvaluationReport::from_config("ner", &metrics, eval).to_string();
        assert_eq!(text.matches("Boundary offset").count(), 2);
        assert!(text.contains("(IoU >= 0.75)"));

        let text = EvaluationReport::new("ner", &metrics).to_string();
        assert_eq!(text.matches("Boundary offset").count(), 4);
    }
}
