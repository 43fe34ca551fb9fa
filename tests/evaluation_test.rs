//! Span evaluation properties and a small NER corpus

mod common;

use common::span;
use proptest::prelude::*;
use rulechef_core::evaluation::{
    boundary_distance, evaluate_spans, find_best_match, span_iou, CorpusMetrics, EvaluationReport,
    LabeledDocument, Span,
};

fn arb_span() -> impl Strategy<Value = Span> {
    ("[A-Z][a-z]{0,6}", 0i64..500, 1i64..40)
        .prop_map(|(text, start, len)| Span::new(text, start, start + len))
}

proptest! {
    #[test]
    fn prop_self_evaluation_is_perfect(spans in prop::collection::vec(arb_span(), 1..20)) {
        let metrics = evaluate_spans(&spans, &spans, false, 0.5);
        prop_assert_eq!(metrics.exact_matches, spans.len());
        prop_assert_eq!(metrics.f1, 1.0);
        prop_assert_eq!(metrics.false_positives, 0);
        prop_assert_eq!(metrics.false_negatives, 0);
    }

    #[test]
    fn prop_counts_are_consistent(
        predictions in prop::collection::vec(arb_span(), 0..15),
        gold in prop::collection::vec(arb_span(), 1..15),
        exact_only in any::<bool>(),
    ) {
        let metrics = evaluate_spans(&predictions, &gold, exact_only, 0.5);
        prop_assert_eq!(metrics.true_positives + metrics.false_positives, predictions.len());
        prop_assert_eq!(metrics.true_positives + metrics.false_negatives, gold.len());
        prop_assert_eq!(metrics.boundary_errors.len(), metrics.partial_matches);
        prop_assert!(metrics.boundary_errors.len() <= predictions.len().min(gold.len()));
        if exact_only {
            prop_assert_eq!(metrics.partial_matches, 0);
        }
    }

    #[test]
    fn prop_iou_symmetric(a in arb_span(), b in arb_span()) {
        prop_assert_eq!(span_iou(&a, &b), span_iou(&b, &a));
        prop_assert_eq!(boundary_distance(&a, &b), boundary_distance(&b, &a));
    }
}

#[test]
fn test_prediction_without_gold() {
    let metrics = evaluate_spans(&[span("A", 0, 1)], &[], false, 0.5);
    assert_eq!(metrics.false_positives, 1);
    assert_eq!(metrics.precision, 0.0);
    assert_eq!(metrics.recall, 0.0);
    assert_eq!(metrics.f1, 0.0);
    assert_eq!(metrics.accuracy_exact, 0.0);
}

#[test]
fn test_one_of_two_gold_found() {
    let predictions = vec![span("A", 0, 1)];
    let gold = vec![span("A", 0, 1), span("B", 2, 3)];
    let metrics = evaluate_spans(&predictions, &gold, false, 0.5);

    assert_eq!(metrics.exact_matches, 1);
    assert_eq!(metrics.false_negatives, 1);
    assert_eq!(metrics.precision, 1.0);
    assert_eq!(metrics.recall, 0.5);
    assert!((metrics.f1 - 0.667).abs() < 1e-3);
}

#[test]
fn test_best_match_threshold_is_inclusive() {
    // IoU exactly 0.5
    let pred = span("Apple", 0, 5);
    let golds = vec![span("Apple Inc.", 0, 10)];
    assert_eq!(find_best_match(&pred, &golds, 0.5), Some((0, 0.5)));
    assert_eq!(find_best_match(&pred, &golds, 0.51), None);
}

#[test]
fn test_malformed_spans_do_not_panic() {
    let reversed = span("x", 10, 2);
    let normal = span("y", 0, 5);
    let iou = span_iou(&reversed, &normal);
    assert!(iou.is_finite());
    let _ = evaluate_spans(&[reversed.clone()], &[normal, reversed], false, 0.5);
}

#[test]
fn test_ner_corpus_report() {
    common::init_tracing();

    let docs = vec![
        LabeledDocument::from_entities(
            "Apple Inc. announced its new iPhone in Cupertino, California.",
            &["Apple Inc.", "Cupertino", "California"],
        ),
        LabeledDocument::from_entities(
            "Tesla Motors, based in Austin, Texas, released earnings.",
            &["Tesla Motors", "Austin", "Texas"],
        ),
    ];

    // Rule output: one boundary slip, one miss, one spurious span
    let predictions = vec![
        vec![
            Span::find(&docs[0].text, "Apple Inc").unwrap(),
            Span::find(&docs[0].text, "Cupertino").unwrap(),
            Span::find(&docs[0].text, "California").unwrap(),
        ],
        vec![
            Span::find(&docs[1].text, "Tesla Motors").unwrap(),
            Span::find(&docs[1].text, "Austin").unwrap(),
            Span::find(&docs[1].text, "released").unwrap(),
        ],
    ];

    let mut corpus = CorpusMetrics::new();
    let mut last = None;
    for (doc, preds) in docs.iter().zip(&predictions) {
        last = Some(corpus.evaluate_document(preds, &doc.gold, false, 0.5));
    }

    assert_eq!(corpus.documents, 2);
    assert_eq!(corpus.fully_correct_documents, 1);
    assert_eq!(corpus.exact_matches, 4);
    assert_eq!(corpus.partial_matches, 1);
    assert_eq!(corpus.false_positives, 1);
    assert_eq!(corpus.false_negatives, 1);
    assert_eq!(corpus.total_gold, 6);
    assert!((corpus.precision() - 5.0 / 6.0).abs() < 1e-9);
    assert!((corpus.accuracy_exact() - 4.0 / 6.0).abs() < 1e-9);

    let last = last.unwrap();
    let report = EvaluationReport::new("tesla", &last).to_string();
    assert!(report.contains("False Positives: 1"));
}
