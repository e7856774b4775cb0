//! Error types for the quizforge crate

use thiserror::Error;

use crate::crawler::FetchError;
use crate::insight::InsightError;
use crate::reader::ReadError;
use crate::storage::StorageError;

/// Result type for quizforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for quizforge operations
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching a source page failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A source unit did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] ReadError),

    /// Writing or reading the record collection failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The generative model call failed
    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),

    /// Tabular input could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Text could not be extracted from a PDF
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// Filesystem error outside of storage
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
