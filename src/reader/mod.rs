//! # Source Readers
//!
//! Turn semi-structured source content into `RawExtraction`s that share one
//! output contract, whatever the source.
//!
//! ## Key Components
//!
//! - `html::read`: parses one question page with fixed structural queries
//! - `document::read`: splits extracted document text into question blocks
//! - `extract::document_text`: loads document text from a PDF or a text file
//! - `reconcile::reconcile`: picks the authoritative answer from the site's
//!   suggestion and the community vote tally
//!
//! Parsing is pure: fetching, retries and delays belong to the pipeline.

mod error;
pub mod document;
pub mod extract;
pub mod html;
pub mod reconcile;

pub use error::ReadError;
pub use reconcile::{reconcile, Reconciliation};

/// Fields extracted from one source unit, before record assembly
#[derive(Debug, Clone, PartialEq)]
pub struct RawExtraction {
    /// Question text; the HTML path keeps its paragraph breaks here
    pub prompt: String,

    /// Lettered options in source order
    pub options: Vec<String>,

    /// Final answer letters, or the path's "no answer" value
    pub answer: String,

    /// Multi-answer flag, known only on the HTML path
    pub is_multi_answer: Option<bool>,

    /// Free-text provenance notes
    pub notes: String,
}
