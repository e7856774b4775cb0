//! # Quizforge - Exam Question Extraction Pipeline
//!
//! This crate turns semi-structured exam content into canonical question
//! records. Question pages are scraped from a Q&A site, or question blocks
//! are cut out of an extracted document, and both paths produce the same
//! `Question` records, collected into one JSON snapshot.
//!
//! ## Features
//!
//! - Typed HTML extraction of prompt, options, suggested answer and vote tally
//! - Answer reconciliation between the site's pick and the community vote
//! - Regex-based splitting of document text into question blocks
//! - A sequential batch orchestrator with retries, politeness delays,
//!   a consecutive-failure circuit breaker and periodic checkpoints
//! - Optional AI explanations through a rate-limited Gemini model
//!
//! ## Example
//!
//! ```rust,no_run
//! use quizforge::model::GeminiModel;
//! use quizforge::pipeline::{Pipeline, PipelineConfig};
//! use quizforge::storage::Storage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let links = quizforge::crawler::read_links("links.csv")?;
//!
//!     let config = PipelineConfig::builder().insight_enabled(false).build();
//!     let pipeline: Pipeline<GeminiModel> =
//!         Pipeline::new(config, Storage::at("questions.json"))?;
//!
//!     let outcome = pipeline.run_links(&links).await;
//!     println!("Collected {} questions", outcome.questions.len());
//!     Ok(())
//! }
//! ```

mod error;
pub mod crawler;
pub mod insight;
pub mod model;
pub mod pipeline;
pub mod question;
pub mod reader;
pub mod storage;
pub mod text;

pub use error::{Error, Result};

/// Re-export of the types most callers need
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::pipeline::{BatchOutcome, Pipeline, PipelineConfig, StopReason};
    pub use crate::question::Question;
    pub use crate::storage::Storage;
}
