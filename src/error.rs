//! Error types for spansweep.

use thiserror::Error;

/// Result type for spansweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spansweep operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The external recognizer failed on the text it was given.
    ///
    /// This is the variant recognizer implementations return from
    /// [`Recognizer::recognize`](crate::Recognizer::recognize).
    #[error("Recognizer failed: {0}")]
    Recognizer(String),

    /// A window scan was aborted because the recognizer failed on a window
    /// and the scan ran under [`FailurePolicy::Abort`](crate::FailurePolicy).
    #[error(
        "Recognition failed on window [{start}, {end}) after {windows_scanned} windows: {message}"
    )]
    Recognition {
        /// Start token index of the failing window.
        start: usize,
        /// End token index (exclusive) of the failing window.
        end: usize,
        /// Number of windows scanned successfully before the failure.
        windows_scanned: usize,
        /// The recognizer's failure message.
        message: String,
    },

    /// A scan was stopped by a cancellation token.
    #[error("Scan cancelled after {windows_scanned} windows")]
    Cancelled {
        /// Number of windows scanned before cancellation was observed.
        windows_scanned: usize,
    },

    /// A requested window violates `0 <= start < end <= len`.
    ///
    /// The scan's own loop bounds can never produce this; seeing it from
    /// the extractor indicates a bug, not a recoverable condition.
    #[error("Invalid window [{start}, {end}) for document of {len} tokens")]
    InvalidWindow {
        /// Requested start token index.
        start: usize,
        /// Requested end token index (exclusive).
        end: usize,
        /// Document length in tokens.
        len: usize,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a recognizer failure error.
    pub fn recognizer(msg: impl Into<String>) -> Self {
        Error::Recognizer(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
