//! # Question Records
//!
//! The canonical output unit of both ingestion paths, plus the ephemeral
//! community vote tally consumed by the answer reconciler.
//!
//! A `Question` serializes with the field names `question`, `options`,
//! `answer`, `is_multi_answer` and `notes`, in that order, followed by an
//! `insight` field when a generative model explained the answer.

use serde::{Deserialize, Serialize};

use crate::reader::RawExtraction;
use crate::text::normalize;

/// Answer value used when a page offers no answer signal at all
pub const NO_ANSWER: &str = "N/A";

/// Represents one extracted exam question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Normalized question text
    #[serde(rename = "question")]
    pub prompt: String,

    /// Options prefixed with their choice letter, in source order
    #[serde(default)]
    pub options: Vec<String>,

    /// One or more choice letters, or a "no answer" value
    #[serde(default)]
    pub answer: String,

    /// Whether `answer` holds more than one letter (HTML path only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_answer: Option<bool>,

    /// Provenance notes joined with `" | "`
    #[serde(default)]
    pub notes: String,

    /// Explanation produced by the generative model, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

impl Question {
    /// Attach a generated explanation before the record is stored
    pub fn with_insight(self, insight: Option<String>) -> Self {
        Self { insight, ..self }
    }
}

impl From<RawExtraction> for Question {
    fn from(raw: RawExtraction) -> Self {
        Question {
            prompt: normalize(&raw.prompt),
            options: raw.options,
            answer: raw.answer,
            is_multi_answer: raw.is_multi_answer,
            notes: raw.notes,
            insight: None,
        }
    }
}

/// One community answer with its vote count
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VoteEntry {
    /// Concatenated answer letters, e.g. "AC"
    #[serde(default)]
    pub voted_answers: String,

    /// Number of votes for this answer
    #[serde(default)]
    pub vote_count: u64,

    /// Whether this answer is the plurality winner
    #[serde(default)]
    pub is_most_voted: bool,
}

/// Aggregated community votes embedded in a question page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    pub entries: Vec<VoteEntry>,
}

impl VoteTally {
    /// Parse the embedded tally payload
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// The first entry flagged as most voted
    pub fn most_voted(&self) -> Option<&VoteEntry> {
        self.entries.iter().find(|entry| entry.is_most_voted)
    }
}
