//! Span geometry: overlap, boundary error and best-match lookup.

use serde::{Deserialize, Serialize};

/// A text fragment with character offsets
///
/// Offsets count Unicode scalar values (`char`s), not bytes, so `"Zürich"`
/// has length 6. Extractors must report spans in the same unit.
///
/// `start <= end` is assumed but not checked; malformed spans produce
/// well-defined (if meaningless) scores rather than errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(text: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Locate the first occurrence of `needle` in `haystack`
    pub fn find(haystack: &str, needle: &str) -> Option<Self> {
        haystack.find(needle).map(|byte_start| {
            let start = char_count(&haystack[..byte_start]);
            Self::new(needle, start, start.saturating_add(char_count(needle)))
        })
    }

    pub fn len(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    /// Same text and same offsets
    pub fn matches_exactly(&self, other: &Span) -> bool {
        self == other
    }
}

fn char_count(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' [{}:{}]", self.text, self.start, self.end)
    }
}

/// Intersection over union of the two offset intervals
pub fn span_iou(a: &Span, b: &Span) -> f64 {
    // i128 holds any difference or sum of i64 offsets
    let (a_start, a_end) = (i128::from(a.start), i128::from(a.end));
    let (b_start, b_end) = (i128::from(b.start), i128::from(b.end));

    let intersection = (a_end.min(b_end) - a_start.max(b_start)).max(0);
    let union = (a_end - a_start) + (b_end - b_start) - intersection;

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Average of the start and end offset errors, truncated
pub fn boundary_distance(pred: &Span, gold: &Span) -> i64 {
    let start_error = u128::from(pred.start.abs_diff(gold.start));
    let end_error = u128::from(pred.end.abs_diff(gold.end));
    i64::try_from((start_error + end_error) / 2).unwrap_or(i64::MAX)
}

/// Best-overlapping gold span for `pred`.
///
/// Scans `golds` in order and keeps the first span reaching the maximum IoU.
/// Returns `None` when that maximum is below `iou_threshold`.
pub fn find_best_match(pred: &Span, golds: &[Span], iou_threshold: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_iou = 0.0;

    for (idx, gold) in golds.iter().enumerate() {
        let iou = span_iou(pred, gold);
        if iou > best_iou {
            best_iou = iou;
            best = Some((idx, iou));
        }
    }

    best.filter(|(_, iou)| *iou >= iou_threshold)
}
