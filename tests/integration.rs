//! End-to-end tests: documents through recognizers through the scan.

use spansweep::{
    extract_spans, recognize_document, Document, ExtractorConfig, FailurePolicy,
    HeuristicRecognizer, MockRecognizer, PatternRecognizer, Recognition, SpanExtractor,
};

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn sunscreen_scenario() {
    // Document ["Apply", "some", "sunscreen"]; a recognizer that only
    // fires on the exact text "sunscreen" must yield exactly one span,
    // re-based to document offsets [2, 3).
    let doc = Document::from_tokens(["Apply", "some", "sunscreen"]);
    let recognizer = MockRecognizer::new("stub")
        .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);

    let report = SpanExtractor::default().extract(&doc, &recognizer).unwrap();

    assert_eq!(report.windows_scanned, 6);
    assert_eq!(report.windows_failed, 0);
    assert_eq!(report.spans.len(), 1);

    let span = &report.spans.spans()[0];
    assert_eq!((span.start, span.end), (2, 3));
    assert_eq!(span.label, "PRODUCT");
    assert_eq!(span.text, "sunscreen");

    // All six windows were actually recognized
    let mut requests = recognizer.requests();
    requests.sort();
    assert_eq!(
        requests,
        vec![
            "Apply",
            "Apply some",
            "Apply some sunscreen",
            "some",
            "some sunscreen",
            "sunscreen",
        ]
    );
}

#[test]
fn windowing_recovers_what_a_single_pass_misses() {
    // The recognizer only fires on the isolated text "sunscreen" - a
    // single full-text pass finds nothing, the window scan finds it.
    let doc = Document::from_tokens(["Apply", "some", "sunscreen"]);
    let recognizer = MockRecognizer::new("stub")
        .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);

    let single_pass = recognize_document(&doc, &recognizer).unwrap();
    assert!(single_pass.is_empty());

    let scanned = extract_spans(&doc, &recognizer).unwrap();
    assert_eq!(scanned.len(), 1);
}

// =============================================================================
// Built-in Recognizers Through the Scan
// =============================================================================

#[test]
fn pattern_scan_end_to_end() {
    let doc = Document::from_text("Paid 100 dollars on 2024-01-15");
    let spans = extract_spans(&doc, &PatternRecognizer::new()).unwrap();

    // tokens: Paid(0) 100(1) dollars(2) on(3) 2024-01-15(4)
    assert!(spans.contains(1, 3, "MONEY"));
    assert!(spans.contains(4, 5, "DATE"));
    assert_eq!(spans.len(), 2);
}

#[test]
fn heuristic_scan_end_to_end() {
    let doc = Document::from_text("we flew to York today");
    let spans = extract_spans(&doc, &HeuristicRecognizer::new()).unwrap();

    // "York" is only ever recognized with the locative "to" before it;
    // every window that shows both agrees on document offsets [3, 4).
    assert_eq!(spans.len(), 1);
    assert!(spans.contains(3, 4, "LOC"));
}

#[test]
fn single_pass_view_matches_recognizer_output() {
    let doc = Document::from_text("she joined Acme Corp last year");
    let spans = recognize_document(&doc, &HeuristicRecognizer::new()).unwrap();

    assert_eq!(spans.len(), 1);
    assert!(spans.contains(2, 4, "ORG"));
    assert_eq!(spans.spans()[0].text, "Acme Corp");
}

// =============================================================================
// Failure Policies
// =============================================================================

#[test]
fn skip_policy_keeps_other_windows() {
    let doc = Document::from_tokens(["Apply", "some", "sunscreen"]);
    let recognizer = MockRecognizer::new("flaky")
        .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")])
        .with_failure("Apply some")
        .with_failure("some sunscreen");

    let report = SpanExtractor::default().extract(&doc, &recognizer).unwrap();

    assert_eq!(report.windows_failed, 2);
    assert_eq!(report.windows_scanned, 4);
    assert!(report.spans.contains(2, 3, "PRODUCT"));
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let doc = Document::from_tokens(["Apply", "some", "sunscreen"]);
    let recognizer = MockRecognizer::new("flaky")
        .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")])
        .with_failure("some sunscreen");

    let extractor = SpanExtractor::new(ExtractorConfig {
        failure_policy: FailurePolicy::Abort,
        ..ExtractorConfig::default()
    });
    let err = extractor.extract(&doc, &recognizer).unwrap_err();

    // Windows before [1, 3) in scan order: [0,1), [0,2), [0,3), [1,2)
    let msg = err.to_string();
    assert!(msg.contains("[1, 3)"), "unexpected error: {msg}");
    assert!(msg.contains("4 windows"), "unexpected error: {msg}");
}

// =============================================================================
// Views and Serialization
// =============================================================================

#[test]
fn label_map_keeps_first_discovery_on_text_collision() {
    // Token "York" appears twice; both occurrences render to the same
    // text but are distinct spans. The map view keeps the first.
    let doc = Document::from_tokens(["York", "and", "York"]);
    let recognizer = MockRecognizer::new("stub")
        .with_response("York", vec![Recognition::new(0, 1, "LOC")])
        .with_response("and York", vec![Recognition::new(1, 2, "GPE")]);

    let spans = extract_spans(&doc, &recognizer).unwrap();
    assert!(spans.contains(0, 1, "LOC"));
    assert!(spans.contains(2, 3, "LOC"));
    assert!(spans.contains(2, 3, "GPE"));

    let map = spans.label_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map["York"], "LOC");
}

#[test]
fn span_collection_serializes_as_span_list() {
    let doc = Document::from_tokens(["Apply", "some", "sunscreen"]);
    let recognizer = MockRecognizer::new("stub")
        .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);

    let spans = extract_spans(&doc, &recognizer).unwrap();
    let value = serde_json::to_value(&spans).unwrap();

    assert_eq!(
        value,
        serde_json::json!([
            { "text": "sunscreen", "label": "PRODUCT", "start": 2, "end": 3 }
        ])
    );
}
