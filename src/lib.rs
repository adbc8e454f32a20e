//! # spansweep
//!
//! Span categorization by exhaustive window scanning.
//!
//! An entity recognizer tuned for full-sentence context can miss entities
//! when they sit mid-sentence. `spansweep` recovers them by brute force:
//! it re-runs recognition on **every** contiguous token range of a
//! document, shifts each hit back into document coordinates, and collects
//! the distinct labeled spans. Expensive on purpose - O(N²) windows, at
//! least O(N³) total work - and bounded-window and parallel modes exist
//! for when that bites.
//!
//! ## Quick Start
//!
//! ```rust
//! use spansweep::{extract_spans, Document, PatternRecognizer};
//!
//! let doc = Document::from_text("Ship it by January 15, 2024 at the latest.");
//! let spans = extract_spans(&doc, &PatternRecognizer::new()).unwrap();
//! assert!(spans.iter().any(|s| s.label == "DATE"));
//! ```
//!
//! ## Bringing Your Own Recognizer
//!
//! The scan consumes any [`Recognizer`]: implement the trait for an
//! adapter around an external NLP engine and inject it. The engine is
//! constructed once, outside the scan; nothing in the hot path mutates
//! shared pipeline state.
//!
//! ```rust
//! use spansweep::{extract_spans, Document, MockRecognizer, Recognition};
//!
//! let doc = Document::from_text("Apply some sunscreen");
//! let recognizer = MockRecognizer::new("stub")
//!     .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);
//!
//! let spans = extract_spans(&doc, &recognizer).unwrap();
//! assert!(spans.contains(2, 3, "PRODUCT"));
//! ```
//!
//! ## Built-in Recognizers
//!
//! | Recognizer | Labels | Basis |
//! |------------|--------|-------|
//! | [`PatternRecognizer`] | DATE, MONEY, PERCENT | Regex formats |
//! | [`HeuristicRecognizer`] | PER, ORG, LOC | Capitalization + context |
//! | [`MockRecognizer`] | any | Canned responses (tests) |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! spansweep = "0.1"                                      # parallel scan included
//! spansweep = { version = "0.1", default-features = false } # sequential only
//! spansweep = { version = "0.1", features = ["fast-lock"] } # parking_lot mutex
//! ```
//!
//! ## Design Notes
//!
//! - **Recognizer-agnostic**: the scan treats recognition as an opaque,
//!   possibly slow capability behind a trait.
//! - **Pure per call**: each extraction is a function of (document,
//!   recognizer) to a fresh [`SpanCollection`]; no state crosses calls.
//! - **Explicit failure policy**: a scan either skips failed windows
//!   (logged and counted) or aborts on the first one - never a mix.

#![warn(missing_docs)]

mod document;
mod error;
mod span;

pub mod extract;
pub mod recognizers;
pub mod sync;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// Re-exports
pub use document::{Document, TokenOffsets};
pub use error::{Error, Result};
pub use extract::{
    extract_spans, recognize_document, CancelToken, ExtractorConfig, FailurePolicy, ScanReport,
    SpanExtractor,
};
pub use recognizers::{HeuristicRecognizer, PatternRecognizer};
pub use span::{Recognition, Span, SpanCollection};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use spansweep::prelude::*;
    //!
    //! let doc = Document::from_text("Paid $100 on January 15, 2024.");
    //! let spans = extract_spans(&doc, &PatternRecognizer::new()).unwrap();
    //! for s in &spans {
    //!     println!("[{}, {}) {}: {}", s.start, s.end, s.label, s.text);
    //! }
    //! ```
    pub use crate::error::{Error, Result};
    pub use crate::extract::{
        extract_spans, recognize_document, ExtractorConfig, FailurePolicy, SpanExtractor,
    };
    pub use crate::{
        Document, HeuristicRecognizer, MockRecognizer, PatternRecognizer, Recognition, Recognizer,
        Span, SpanCollection,
    };
}

/// Trait for entity recognizers.
///
/// A recognizer maps text to zero or more labeled entities whose offsets
/// are **token indices of the text it was given** - the window scan
/// re-bases them into document coordinates. Implementations wrap whatever
/// actually recognizes entities: regex patterns, heuristics, or an
/// external pretrained model.
///
/// The trait is deliberately open: the recognizer is an external
/// capability by definition, so downstream crates implement it for their
/// own engines. Implementations must be `Send + Sync`; the parallel scan
/// shares one recognizer across worker threads.
pub trait Recognizer: Send + Sync {
    /// Recognize entities in `text`.
    ///
    /// # Returns
    /// Recognitions with token offsets local to `text`. Failures are
    /// reported as [`Error::Recognizer`]; the scan's failure policy
    /// decides what happens next.
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>>;

    /// Labels this recognizer can emit.
    fn labels(&self) -> Vec<String>;

    /// Recognizer name/identifier.
    fn name(&self) -> &'static str {
        "unknown"
    }

    /// Human-readable description.
    fn description(&self) -> &'static str {
        "Unknown recognizer"
    }
}

/// A mock recognizer for testing and examples.
///
/// Answers from a canned table keyed by exact text, records every text it
/// is asked to recognize, and can be told to fail on specific texts to
/// exercise failure policies.
///
/// # Example
///
/// ```rust
/// use spansweep::{MockRecognizer, Recognition, Recognizer};
///
/// let mock = MockRecognizer::new("stub")
///     .with_response("sunscreen", vec![Recognition::new(0, 1, "PRODUCT")]);
///
/// assert_eq!(mock.recognize("sunscreen").unwrap().len(), 1);
/// assert!(mock.recognize("anything else").unwrap().is_empty());
/// assert_eq!(mock.requests().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    name: &'static str,
    responses: HashMap<String, Vec<Recognition>>,
    failures: HashSet<String>,
    requests: Arc<sync::Mutex<Vec<String>>>,
}

impl MockRecognizer {
    /// Create a mock recognizer.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Return `recognitions` whenever asked to recognize exactly `text`.
    #[must_use]
    pub fn with_response(mut self, text: impl Into<String>, recognitions: Vec<Recognition>) -> Self {
        self.responses.insert(text.into(), recognitions);
        self
    }

    /// Fail whenever asked to recognize exactly `text`.
    #[must_use]
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        self.failures.insert(text.into());
        self
    }

    /// Every text this recognizer was asked to recognize, in call order.
    ///
    /// Clones share the log, so a clone handed to an extractor reports
    /// back through the original.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        sync::lock(&self.requests).clone()
    }
}

impl Recognizer for MockRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>> {
        sync::lock(&self.requests).push(text.to_string());

        if self.failures.contains(text) {
            return Err(Error::recognizer(format!("mock failure on {text:?}")));
        }
        Ok(self.responses.get(text).cloned().unwrap_or_default())
    }

    fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .responses
            .values()
            .flatten()
            .map(|r| r.label.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Mock recognizer with canned responses"
    }
}
