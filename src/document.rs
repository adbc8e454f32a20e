//! Documents as ordered token sequences.
//!
//! A [`Document`] is the unit of extraction: an immutable, ordered list of
//! tokens. Any contiguous token range `[start, end)` can be rendered back
//! to text, which is what the window scan feeds to a recognizer.
//!
//! Two coordinate systems meet here:
//!
//! - **Token space**: what spans and recognitions are expressed in.
//! - **Character space**: what text-matching recognizers (regex and
//!   friends) naturally produce.
//!
//! [`TokenOffsets`] bridges the two for recognizers that match on text.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An ordered, immutable sequence of tokens.
///
/// Documents compare by content: two documents are equal iff their token
/// sequences are equal.
///
/// # Example
///
/// ```rust
/// use spansweep::Document;
///
/// let doc = Document::from_text("Apply some sunscreen.");
/// assert_eq!(doc.len(), 3);
/// assert_eq!(doc.window_text(2, 3).unwrap(), "sunscreen");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    tokens: Vec<String>,
}

impl Document {
    /// Create a document from pre-split tokens.
    ///
    /// Tokens are opaque to the scan, but window rendering joins them with
    /// single spaces; tokens containing whitespace will shift the token
    /// offsets a text-based recognizer reports for that window.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Tokenize text into a document, dropping punctuation.
    ///
    /// Uses the same offset-preserving word tokenizer as the built-in
    /// recognizers, so window-local token offsets line up with document
    /// token offsets.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: words(text).into_iter().map(|w| w.text.to_string()).collect(),
        }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the document has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Token at `idx`, if in bounds.
    #[must_use]
    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    /// Render the full document to text.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Render the token range `[start, end)` to text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] unless `start < end <= len`.
    pub fn window_text(&self, start: usize, end: usize) -> Result<String> {
        if start >= end || end > self.tokens.len() {
            return Err(Error::InvalidWindow {
                start,
                end,
                len: self.tokens.len(),
            });
        }
        Ok(self.tokens[start..end].join(" "))
    }
}

// =============================================================================
// Word Tokenizer
// =============================================================================

/// A word with its character offsets in the text it was split from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Word<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Simple tokenizer that preserves character offsets.
///
/// A word is a maximal run of alphanumeric characters plus `'` and `-`;
/// everything else (including punctuation) separates words and is dropped.
pub(crate) fn words(text: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() || c == '\'' || c == '-' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            out.push(Word {
                text: &text[s..i],
                start: s,
                end: i,
            });
            start = None;
        }
    }

    // Handle last word
    if let Some(s) = start {
        out.push(Word {
            text: &text[s..],
            start: s,
            end: text.len(),
        });
    }

    out
}

// =============================================================================
// Char Span -> Token Span Mapping
// =============================================================================

/// Maps character spans in a text to token spans.
///
/// Text-matching recognizers find entities at character offsets; the scan
/// needs them at token offsets. Build a `TokenOffsets` once per text and
/// convert each match.
///
/// # Example
///
/// ```rust
/// use spansweep::TokenOffsets;
///
/// let offsets = TokenOffsets::of("costs $100 today");
/// // "$100" occupies bytes 6..10, which is token 1 ("100").
/// assert_eq!(offsets.char_span_to_tokens(6, 10), Some((1, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct TokenOffsets {
    /// Character spans for each token: `[(char_start, char_end), ...]`
    offsets: Vec<(usize, usize)>,
}

impl TokenOffsets {
    /// Tokenize `text` and record each token's character span.
    #[must_use]
    pub fn of(text: &str) -> Self {
        Self {
            offsets: words(text).into_iter().map(|w| (w.start, w.end)).collect(),
        }
    }

    /// Character span for a token.
    #[must_use]
    pub fn get(&self, token_idx: usize) -> Option<(usize, usize)> {
        self.offsets.get(token_idx).copied()
    }

    /// Find the tokens that overlap a character span.
    ///
    /// Returns `(first_token, last_token_exclusive)`, or `None` if the
    /// span touches no token.
    #[must_use]
    pub fn char_span_to_tokens(&self, char_start: usize, char_end: usize) -> Option<(usize, usize)> {
        let mut first_token = None;
        let mut last_token = 0;

        for (idx, &(tok_start, tok_end)) in self.offsets.iter().enumerate() {
            if tok_end > char_start && tok_start < char_end {
                if first_token.is_none() {
                    first_token = Some(idx);
                }
                last_token = idx + 1;
            }
        }

        first_token.map(|first| (first, last_token))
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Check if the text had no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
