//! The exhaustive window scan.
//!
//! # How Spans Are Recovered
//!
//! A recognizer tuned for full-sentence context can miss an entity when it
//! only sees that entity mid-sentence, and find it when the entity stands
//! alone. The scan compensates by brute force: every contiguous token
//! range `[i, j)` of the document is rendered to text and recognized in
//! isolation, and every recognition is shifted back into document
//! coordinates and collected.
//!
//! ```text
//! Document: ["Apply", "some", "sunscreen"]          (N = 3)
//!
//! Window [0,1): "Apply"                → (nothing)
//! Window [0,2): "Apply some"           → (nothing)
//! Window [0,3): "Apply some sunscreen" → (nothing)
//! Window [1,2): "some"                 → (nothing)
//! Window [1,3): "some sunscreen"       → (nothing)
//! Window [2,3): "sunscreen"            → PRODUCT at local [0,1)
//!                                        rebased: [2,3) PRODUCT
//!
//! Result: { [2,3) PRODUCT "sunscreen" }
//! ```
//!
//! That is O(N²) windows, each paying a recognition that is itself at
//! least linear in window length — O(N³) overall. The cost is the point:
//! the scan trades time for recall. [`ExtractorConfig::max_window`] caps
//! the window length when the full scan is too expensive.
//!
//! # Quick Start
//!
//! ```rust
//! use spansweep::{extract_spans, Document, MockRecognizer, Recognition};
//!
//! let doc = Document::from_text("Apply some sunscreen");
//! let recognizer = MockRecognizer::new("demo")
//!     .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);
//!
//! let spans = extract_spans(&doc, &recognizer).unwrap();
//! assert_eq!(spans.len(), 1);
//! assert_eq!(spans.spans()[0].start, 2);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::span::Recognition;
use crate::{Document, Error, Recognizer, Result, Span, SpanCollection};

// =============================================================================
// Configuration
// =============================================================================

/// What to do when the recognizer fails on a window.
///
/// A scan uses exactly one policy throughout; failures are never handled
/// one way for some windows and another way for the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure, count it, and keep scanning (default).
    ///
    /// A single bad window does not invalidate spans found in other
    /// windows; the failure count is reported in the [`ScanReport`].
    #[default]
    Skip,

    /// Stop at the first failure.
    ///
    /// The resulting [`Error::Recognition`] reports the failing window
    /// and how many windows succeeded before it.
    Abort,
}

/// Configuration for a [`SpanExtractor`].
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Cap on window length in tokens. `None` scans every window, which
    /// is the reference behavior.
    pub max_window: Option<usize>,

    /// What to do when the recognizer fails on a window.
    pub failure_policy: FailurePolicy,

    /// Scan windows across a rayon worker pool.
    ///
    /// Requires the `parallel` feature; without it the flag is ignored
    /// and the scan runs sequentially. Parallel scans produce the same
    /// membership as sequential scans but make no promise about
    /// discovery order.
    pub parallel: bool,
}

/// Cooperative cancellation flag, checked between windows.
///
/// Cloning is cheap; all clones share the flag. A cancelled scan fails
/// with [`Error::Cancelled`] reporting how many windows it completed.
///
/// # Example
///
/// ```rust
/// use spansweep::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// =============================================================================
// Scan Report
// =============================================================================

/// The outcome of one scan: the spans plus window accounting.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Deduplicated spans in first-discovery order (sequential scans
    /// only; parallel scans leave the order unspecified).
    pub spans: SpanCollection,

    /// Number of windows the recognizer processed successfully.
    pub windows_scanned: usize,

    /// Number of windows skipped after a recognizer failure. Always zero
    /// under [`FailurePolicy::Abort`].
    pub windows_failed: usize,
}

// =============================================================================
// Extractor
// =============================================================================

/// Exhaustive window-scan span extractor.
///
/// A pure function of (document, recognizer): no state survives between
/// calls, and the input document is never mutated.
///
/// # Example
///
/// ```rust
/// use spansweep::{Document, ExtractorConfig, MockRecognizer, Recognition, SpanExtractor};
///
/// let doc = Document::from_text("sunscreen helps");
/// let recognizer = MockRecognizer::new("demo")
///     .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);
///
/// let extractor = SpanExtractor::new(ExtractorConfig {
///     max_window: Some(1),
///     ..ExtractorConfig::default()
/// });
/// let report = extractor.extract(&doc, &recognizer).unwrap();
/// assert_eq!(report.windows_scanned, 2);
/// assert_eq!(report.spans.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpanExtractor {
    config: ExtractorConfig,
    cancel: Option<CancelToken>,
}

impl SpanExtractor {
    /// Create an extractor with the given configuration.
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attach a cancellation token, checked between windows.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan every window of `document` and collect the recognized spans.
    ///
    /// An empty document yields an empty report without invoking the
    /// recognizer at all.
    ///
    /// # Errors
    ///
    /// - [`Error::Recognition`] if a window fails under
    ///   [`FailurePolicy::Abort`].
    /// - [`Error::Cancelled`] if the attached [`CancelToken`] fires.
    pub fn extract(&self, document: &Document, recognizer: &dyn Recognizer) -> Result<ScanReport> {
        if document.is_empty() {
            return Ok(ScanReport {
                spans: SpanCollection::new(),
                windows_scanned: 0,
                windows_failed: 0,
            });
        }

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return self.extract_parallel(document, recognizer);
        }

        #[cfg(not(feature = "parallel"))]
        if self.config.parallel {
            log::debug!("parallel scan requested without the `parallel` feature; scanning sequentially");
        }

        self.extract_sequential(document, recognizer)
    }

    /// Reference scan: nested `(i, j)` loops in order.
    fn extract_sequential(
        &self,
        document: &Document,
        recognizer: &dyn Recognizer,
    ) -> Result<ScanReport> {
        let n = document.len();
        let mut spans = SpanCollection::new();
        let mut scanned = 0usize;
        let mut failed = 0usize;

        for i in 0..n {
            for j in (i + 1)..=self.window_end(i, n) {
                if self.cancelled() {
                    return Err(Error::Cancelled {
                        windows_scanned: scanned,
                    });
                }

                let text = document.window_text(i, j)?;
                match recognizer.recognize(&text) {
                    Ok(recognitions) => {
                        scanned += 1;
                        for rec in &recognitions {
                            insert_rebased(document, &mut spans, rec, i, j);
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        self.window_failure(i, j, scanned, &e)?;
                    }
                }
            }
        }

        Ok(ScanReport {
            spans,
            windows_scanned: scanned,
            windows_failed: failed,
        })
    }

    /// Parallel scan: windows distributed over rayon, inserts under one
    /// lock so the dedup check and the insert are a single critical
    /// section.
    #[cfg(feature = "parallel")]
    fn extract_parallel(
        &self,
        document: &Document,
        recognizer: &dyn Recognizer,
    ) -> Result<ScanReport> {
        use rayon::prelude::*;
        use std::sync::atomic::AtomicUsize;

        let n = document.len();
        let windows: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..=self.window_end(i, n)).map(move |j| (i, j)))
            .collect();

        let spans = crate::sync::Mutex::new(SpanCollection::new());
        let scanned = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        windows.par_iter().try_for_each(|&(i, j)| -> Result<()> {
            if self.cancelled() {
                return Err(Error::Cancelled {
                    windows_scanned: scanned.load(Ordering::Relaxed),
                });
            }

            let text = document.window_text(i, j)?;
            match recognizer.recognize(&text) {
                Ok(recognitions) => {
                    scanned.fetch_add(1, Ordering::Relaxed);
                    let mut guard = crate::sync::lock(&spans);
                    for rec in &recognitions {
                        insert_rebased(document, &mut guard, rec, i, j);
                    }
                    Ok(())
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    self.window_failure(i, j, scanned.load(Ordering::Relaxed), &e)
                }
            }
        })?;

        Ok(ScanReport {
            spans: crate::sync::into_inner(spans),
            windows_scanned: scanned.load(Ordering::Relaxed),
            windows_failed: failed.load(Ordering::Relaxed),
        })
    }

    /// Largest valid `j` for a window starting at `i`.
    fn window_end(&self, i: usize, n: usize) -> usize {
        match self.config.max_window {
            Some(w) => n.min(i + w),
            None => n,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Apply the failure policy to a failed window.
    fn window_failure(&self, i: usize, j: usize, scanned: usize, error: &Error) -> Result<()> {
        match self.config.failure_policy {
            FailurePolicy::Skip => {
                log::warn!("recognition failed on window [{i}, {j}): {error}");
                Ok(())
            }
            FailurePolicy::Abort => Err(Error::Recognition {
                start: i,
                end: j,
                windows_scanned: scanned,
                message: error.to_string(),
            }),
        }
    }
}

/// Shift a window-local recognition into document coordinates and insert
/// it unless an equal span is already present.
///
/// A recognition whose offsets fall outside its window is a recognizer
/// bug; it is dropped with a warning rather than poisoning the
/// collection.
fn insert_rebased(
    document: &Document,
    spans: &mut SpanCollection,
    rec: &Recognition,
    i: usize,
    j: usize,
) {
    if rec.start >= rec.end || rec.end > j - i {
        log::warn!(
            "dropping recognition [{}, {}) {:?} outside window [{i}, {j})",
            rec.start,
            rec.end,
            rec.label
        );
        return;
    }

    let start = rec.start + i;
    let end = rec.end + i;

    if let Ok(text) = document.window_text(start, end) {
        spans.insert(Span::new(text, rec.label.clone(), start, end));
    }
}

// =============================================================================
// Convenience Entry Points
// =============================================================================

/// Scan every window of `document` with the reference configuration
/// (sequential, unbounded windows, skip-and-continue) and return the
/// deduplicated spans.
///
/// # Errors
///
/// Only propagates internal invariant violations; recognizer failures are
/// logged and skipped.
pub fn extract_spans(document: &Document, recognizer: &dyn Recognizer) -> Result<SpanCollection> {
    SpanExtractor::default()
        .extract(document, recognizer)
        .map(|report| report.spans)
}

/// Single-pass view: recognize the full document text once, with no
/// window enumeration.
///
/// Recognitions arrive already in document coordinates (the "window" is
/// `[0, N)`). An empty document returns an empty collection without
/// invoking the recognizer.
///
/// # Errors
///
/// Propagates the recognizer's failure unchanged.
pub fn recognize_document(
    document: &Document,
    recognizer: &dyn Recognizer,
) -> Result<SpanCollection> {
    let mut spans = SpanCollection::new();
    if document.is_empty() {
        return Ok(spans);
    }

    let n = document.len();
    for rec in &recognizer.recognize(&document.text())? {
        insert_rebased(document, &mut spans, rec, 0, n);
    }
    Ok(spans)
}

// =============================================================================
// Tests
// =============================================================================
