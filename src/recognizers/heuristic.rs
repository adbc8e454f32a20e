//! Heuristic recognizer - Person/Org/Location via capitalization and context.
//!
//! Zero-dependency guesswork: capitalized token runs are candidate
//! entities, classified by nearby cues (honorifics, organization
//! suffixes, locative prepositions). Precision is modest; when a run
//! matches no cue it is dropped rather than guessed at, except for
//! multi-token title-case runs, which default to PER.
//!
//! Offsets are token indices of the given text, directly usable by the
//! window scan.

use crate::document::words;
use crate::span::Recognition;
use crate::{Recognizer, Result};

/// Honorifics and role words that mark the following run as a person.
const PERSON_TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "professor", "president", "senator", "judge", "captain",
];

/// Suffix words that mark a run as an organization.
const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "ltd", "llc", "company", "group", "university", "institute",
    "bank", "agency", "committee",
];

/// Prepositions that mark the following run as a location.
const LOCATION_CUES: &[&str] = &["in", "at", "from", "near", "to", "toward"];

/// Heuristic Person/Org/Location recognizer.
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    /// Create a heuristic recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Recognition>> {
        let tokens: Vec<&str> = words(text).into_iter().map(|w| w.text).collect();
        let mut found = Vec::new();

        let mut i = 0;
        while i < tokens.len() {
            if !is_capitalized(tokens[i]) {
                i += 1;
                continue;
            }

            // Extend the capitalized run
            let mut j = i + 1;
            while j < tokens.len() && is_capitalized(tokens[j]) {
                j += 1;
            }

            if let Some(rec) = classify_run(&tokens, i, j) {
                found.push(rec);
            }
            i = j;
        }

        Ok(found)
    }

    fn labels(&self) -> Vec<String> {
        vec!["PER".into(), "ORG".into(), "LOC".into()]
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn description(&self) -> &'static str {
        "Heuristic recognizer (Person/Org/Location via capitalization + context)"
    }
}

/// Classify the capitalized run `[start, end)` using its contents and the
/// token before it.
fn classify_run(tokens: &[&str], start: usize, end: usize) -> Option<Recognition> {
    let preceding = start.checked_sub(1).map(|p| tokens[p].to_lowercase());

    // A title word prefixes a person; the title itself is not part of the
    // span unless it is capitalized into the run.
    if let Some(prev) = &preceding {
        if PERSON_TITLES.contains(&prev.as_str()) {
            return Some(Recognition::new(start, end, "PER"));
        }
    }

    if tokens[start..end]
        .iter()
        .any(|t| ORG_SUFFIXES.contains(&t.to_lowercase().as_str()))
    {
        return Some(Recognition::new(start, end, "ORG"));
    }

    if let Some(prev) = &preceding {
        if LOCATION_CUES.contains(&prev.as_str()) {
            return Some(Recognition::new(start, end, "LOC"));
        }
    }

    // Two or more title-case words with no other cue: probably a name
    if end - start >= 2 && tokens[start..end].iter().all(|t| is_title_case(t)) {
        return Some(Recognition::new(start, end, "PER"));
    }

    None
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn is_title_case(token: &str) -> bool {
    is_capitalized(token)
        && token
            .chars()
            .skip(1)
            .all(|c| !c.is_alphabetic() || c.is_lowercase())
}
