//! Spans, recognitions, and the deduplicated span collection.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A labeled entity reported by a recognizer, in window-local token
/// coordinates.
///
/// `start`/`end` index tokens of the text the recognizer was given, not
/// the document the text was cut from; the scan re-bases them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recognition {
    /// Start token index within the recognized text (inclusive).
    pub start: usize,
    /// End token index within the recognized text (exclusive).
    pub end: usize,
    /// Category label.
    pub label: String,
}

impl Recognition {
    /// Create a recognition.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// A labeled contiguous token range within a document.
///
/// Two spans are equal iff their `(start, end, label)` agree; `text` is
/// the surface rendering of the spanned tokens, derived from the document
/// at insertion time and carried for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Surface text of the spanned tokens.
    pub text: String,
    /// Category label assigned by the recognizer.
    pub label: String,
    /// Start token index in the document (inclusive).
    pub start: usize,
    /// End token index in the document (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
        }
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn key(&self) -> SpanKey {
        (self.start, self.end, self.label.clone())
    }
}

type SpanKey = (usize, usize, String);

/// Deduplicated spans for one document, in first-discovery order.
///
/// Membership is keyed on `(start, end, label)`; inserting a span whose
/// key is already present is a no-op, so the first discovery wins and
/// later duplicates are dropped, not merged. Serializes as the ordered
/// list of spans.
///
/// # Example
///
/// ```rust
/// use spansweep::{Span, SpanCollection};
///
/// let mut spans = SpanCollection::new();
/// assert!(spans.insert(Span::new("sunscreen", "PRODUCT", 2, 3)));
/// assert!(!spans.insert(Span::new("sunscreen", "PRODUCT", 2, 3)));
/// assert_eq!(spans.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Span>", into = "Vec<Span>")]
pub struct SpanCollection {
    spans: Vec<Span>,
    seen: HashSet<SpanKey>,
}

impl SpanCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a span unless an equal one is already present.
    ///
    /// Returns `true` if the span was inserted, `false` if it was a
    /// duplicate and dropped.
    pub fn insert(&mut self, span: Span) -> bool {
        if self.seen.insert(span.key()) {
            self.spans.push(span);
            true
        } else {
            false
        }
    }

    /// Check membership by `(start, end, label)`.
    #[must_use]
    pub fn contains(&self, start: usize, end: usize, label: &str) -> bool {
        self.seen.contains(&(start, end, label.to_string()))
    }

    /// Number of distinct spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans in first-discovery order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Iterate spans in first-discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    /// Text-keyed label view.
    ///
    /// Distinct spans can render to identical text; the first discovered
    /// span keeps the entry and later collisions are ignored.
    #[must_use]
    pub fn label_map(&self) -> HashMap<&str, &str> {
        let mut map = HashMap::new();
        for span in &self.spans {
            map.entry(span.text.as_str()).or_insert(span.label.as_str());
        }
        map
    }
}

impl From<Vec<Span>> for SpanCollection {
    fn from(spans: Vec<Span>) -> Self {
        let mut out = Self::new();
        for span in spans {
            out.insert(span);
        }
        out
    }
}

impl From<SpanCollection> for Vec<Span> {
    fn from(collection: SpanCollection) -> Self {
        collection.spans
    }
}

impl FromIterator<Span> for SpanCollection {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        let mut out = Self::new();
        for span in iter {
            out.insert(span);
        }
        out
    }
}

impl Extend<Span> for SpanCollection {
    fn extend<I: IntoIterator<Item = Span>>(&mut self, iter: I) {
        for span in iter {
            self.insert(span);
        }
    }
}

impl IntoIterator for SpanCollection {
    type Item = Span;
    type IntoIter = std::vec::IntoIter<Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanCollection {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_span() -> impl Strategy<Value = Span> {
        (0usize..20, 1usize..5, "[A-Z]{2,4}").prop_map(|(start, len, label)| {
            Span::new("t", label, start, start + len)
        })
    }

    proptest! {
        /// No two spans in a collection share (start, end, label).
        #[test]
        fn no_duplicate_keys(spans in proptest::collection::vec(arb_span(), 0..50)) {
            let collection: SpanCollection = spans.into_iter().collect();
            let mut keys = std::collections::HashSet::new();
            for s in &collection {
                prop_assert!(keys.insert((s.start, s.end, s.label.clone())));
            }
        }

        /// Inserting the same sequence twice changes nothing.
        #[test]
        fn idempotent_extend(spans in proptest::collection::vec(arb_span(), 0..30)) {
            let mut collection: SpanCollection = spans.iter().cloned().collect();
            let before: Vec<_> = collection.spans().to_vec();
            collection.extend(spans);
            prop_assert_eq!(collection.spans(), before.as_slice());
        }
    }
}
