//! Error types for the reader module

use thiserror::Error;

/// Error type for reading a single source unit
#[derive(Debug, Error)]
pub enum ReadError {
    /// The page has no question prompt element
    #[error("question prompt not found")]
    MissingPrompt,

    /// A document block has no lettered option marker
    #[error("no lettered option marker in block")]
    MissingOptionMarker,

    /// A structural query could not be compiled
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector text
        selector: &'static str,
        /// Parser message
        message: String,
    },

    /// The embedded vote tally could not be decoded
    #[error("malformed vote tally: {0}")]
    MalformedTally(#[from] serde_json::Error),
}
