//! Error types for the crawler module

use thiserror::Error;

/// Error type for fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error, including timeouts and connection faults
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status_code} for {url}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Requested URL
        url: String,
    },

    /// The fetcher could not be constructed
    #[error("client setup error: {0}")]
    ClientSetup(String),
}
