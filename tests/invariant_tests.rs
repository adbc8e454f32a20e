//! Invariant tests for the window scan.
//!
//! These verify properties that should hold for ANY document and any
//! deterministic recognizer, regardless of input.

use proptest::prelude::*;
use spansweep::{
    extract_spans, Document, ExtractorConfig, Recognition, Recognizer, Result, SpanExtractor,
};
use std::collections::HashSet;

// =============================================================================
// Deterministic Test Recognizers
// =============================================================================

/// Reports every token of its input as a TOK entity.
struct EveryToken;

impl Recognizer for EveryToken {
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>> {
        let count = text.split(' ').filter(|t| !t.is_empty()).count();
        Ok((0..count).map(|k| Recognition::new(k, k + 1, "TOK")).collect())
    }

    fn labels(&self) -> Vec<String> {
        vec!["TOK".into()]
    }

    fn name(&self) -> &'static str {
        "every-token"
    }
}

/// Reports its entire input as one WIN entity.
struct FullWindow;

impl Recognizer for FullWindow {
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>> {
        let count = text.split(' ').filter(|t| !t.is_empty()).count();
        if count == 0 {
            return Ok(vec![]);
        }
        Ok(vec![Recognition::new(0, count, "WIN")])
    }

    fn labels(&self) -> Vec<String> {
        vec!["WIN".into()]
    }

    fn name(&self) -> &'static str {
        "full-window"
    }
}

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Za-z0-9]{1,8}", 0..10)
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    /// INVARIANT: no two spans in a result share (start, end, label).
    #[test]
    fn no_duplicate_spans(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);
        let spans = extract_spans(&doc, &FullWindow).unwrap();

        let mut keys = HashSet::new();
        for s in &spans {
            prop_assert!(
                keys.insert((s.start, s.end, s.label.clone())),
                "duplicate span [{}, {}) {}",
                s.start, s.end, s.label
            );
        }
    }

    /// INVARIANT: every span lies within the document.
    #[test]
    fn spans_within_document_bounds(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);
        let n = doc.len();

        for recognizer in [&EveryToken as &dyn Recognizer, &FullWindow] {
            let spans = extract_spans(&doc, recognizer).unwrap();
            for s in &spans {
                prop_assert!(s.start < s.end, "empty span [{}, {})", s.start, s.end);
                prop_assert!(s.end <= n, "span [{}, {}) exceeds {} tokens", s.start, s.end, n);
            }
        }
    }

    /// The result is the union over all windows: a recognizer that tags
    /// every token yields exactly the N single-token spans.
    #[test]
    fn union_of_token_recognitions(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);
        let n = doc.len();
        let spans = extract_spans(&doc, &EveryToken).unwrap();

        prop_assert_eq!(spans.len(), n);
        for t in 0..n {
            prop_assert!(spans.contains(t, t + 1, "TOK"));
        }
    }

    /// A recognizer that tags every full window yields exactly one span
    /// per window: N * (N + 1) / 2 in total.
    #[test]
    fn union_of_window_recognitions(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);
        let n = doc.len();
        let spans = extract_spans(&doc, &FullWindow).unwrap();

        prop_assert_eq!(spans.len(), n * (n + 1) / 2);
        for i in 0..n {
            for j in (i + 1)..=n {
                prop_assert!(spans.contains(i, j, "WIN"));
            }
        }
    }

    /// INVARIANT: sequential scans are deterministic, including order.
    #[test]
    fn sequential_scans_are_deterministic(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);

        let a = extract_spans(&doc, &FullWindow).unwrap();
        let b = extract_spans(&doc, &FullWindow).unwrap();
        prop_assert_eq!(a.spans(), b.spans());
    }

    /// A bounded scan equals the unbounded scan restricted to windows of
    /// the allowed length.
    #[test]
    fn bounded_scan_is_a_restriction(tokens in arb_tokens(), max in 1usize..6) {
        let doc = Document::from_tokens(tokens);

        let bounded = SpanExtractor::new(ExtractorConfig {
            max_window: Some(max),
            ..ExtractorConfig::default()
        })
        .extract(&doc, &FullWindow)
        .unwrap();

        let unbounded = extract_spans(&doc, &FullWindow).unwrap();
        let restricted: Vec<_> = unbounded
            .iter()
            .filter(|s| s.len() <= max)
            .cloned()
            .collect();

        prop_assert_eq!(bounded.spans.spans(), restricted.as_slice());
    }
}

#[cfg(feature = "parallel")]
proptest! {
    /// Parallel scans agree with sequential scans on membership.
    #[test]
    fn parallel_matches_sequential(tokens in arb_tokens()) {
        let doc = Document::from_tokens(tokens);

        let sequential = extract_spans(&doc, &EveryToken).unwrap();
        let parallel = SpanExtractor::new(ExtractorConfig {
            parallel: true,
            ..ExtractorConfig::default()
        })
        .extract(&doc, &EveryToken)
        .unwrap();

        let seq: HashSet<_> = sequential
            .iter()
            .map(|s| (s.start, s.end, s.label.clone()))
            .collect();
        let par: HashSet<_> = parallel
            .spans
            .iter()
            .map(|s| (s.start, s.end, s.label.clone()))
            .collect();
        prop_assert_eq!(seq, par);
    }
}
