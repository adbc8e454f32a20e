//! Built-in recognizer implementations.
//!
//! Each recognizer implements the [`Recognizer`](crate::Recognizer) trait
//! and reports entities in token offsets of the text it was given.
//!
//! | Recognizer | Labels | Basis | Precision |
//! |------------|--------|-------|-----------|
//! | [`PatternRecognizer`] | DATE, MONEY, PERCENT | Regex formats | High |
//! | [`HeuristicRecognizer`] | PER, ORG, LOC | Capitalization + context | Low |
//! | [`MockRecognizer`](crate::MockRecognizer) | any | Canned responses | Tests |
//!
//! The window scan is recognizer-agnostic: anything implementing the
//! trait can be injected, including wrappers around external NLP engines.
//! The built-ins exist so the crate works out of the box and so tests
//! have deterministic recognizers to drive the scan with.

pub mod heuristic;
pub mod pattern;

pub use heuristic::HeuristicRecognizer;
pub use pattern::PatternRecognizer;
