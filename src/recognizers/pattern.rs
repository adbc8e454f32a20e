//! Pattern-based recognizer - extracts entities via regex patterns only.
//!
//! No hardcoded gazetteers. Only extracts entities that can be reliably
//! identified by their format:
//! - Dates: ISO 8601, MM/DD/YYYY, "January 15, 2024"
//! - Money: $100, 50 dollars
//! - Percentages: 15%, 3.5%
//!
//! Matches are found at character offsets and mapped to token offsets of
//! the given text, which is what the window scan consumes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::TokenOffsets;
use crate::span::Recognition;
use crate::{Recognizer, Result};

/// Pattern-based recognizer - only finds entities with recognizable formats.
///
/// For Person/Organization/Location, use
/// [`HeuristicRecognizer`](super::HeuristicRecognizer) or an external
/// model behind the [`Recognizer`] trait.
pub struct PatternRecognizer;

impl PatternRecognizer {
    /// Create a pattern recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>> {
        let offsets = TokenOffsets::of(text);
        let mut found = Vec::new();

        // Date patterns
        static DATE_ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
        static DATE_US: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap());
        static DATE_WRITTEN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:,\s*\d{4})?\b").unwrap()
        });

        for pattern in [&*DATE_ISO, &*DATE_US, &*DATE_WRITTEN] {
            collect(pattern, text, &offsets, "DATE", &mut found);
        }

        // Money patterns
        static MONEY_SYMBOL: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\$[\d,]+(?:\.\d+)?(?:\s*(?:billion|million|thousand))?").unwrap());
        static MONEY_WRITTEN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b\d+(?:\.\d+)?\s*(?:dollars?|USD|EUR|GBP)\b").unwrap()
        });

        for pattern in [&*MONEY_SYMBOL, &*MONEY_WRITTEN] {
            collect(pattern, text, &offsets, "MONEY", &mut found);
        }

        // Percentage patterns
        static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\s*%").unwrap());

        collect(&PERCENT, text, &offsets, "PERCENT", &mut found);

        Ok(found)
    }

    fn labels(&self) -> Vec<String> {
        vec!["DATE".into(), "MONEY".into(), "PERCENT".into()]
    }

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn description(&self) -> &'static str {
        "Pattern-based recognizer (dates, money, percentages only)"
    }
}

/// Run one pattern and append non-overlapping token-space recognitions.
fn collect(
    pattern: &Regex,
    text: &str,
    offsets: &TokenOffsets,
    label: &str,
    found: &mut Vec<Recognition>,
) {
    for m in pattern.find_iter(text) {
        if let Some((start, end)) = offsets.char_span_to_tokens(m.start(), m.end()) {
            if !overlaps(found, start, end) {
                found.push(Recognition::new(start, end, label));
            }
        }
    }
}

/// Check if a token span overlaps an already-found recognition.
fn overlaps(found: &[Recognition], start: usize, end: usize) -> bool {
    found.iter().any(|r| !(end <= r.start || start >= r.end))
}
