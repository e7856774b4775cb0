//! # AI Insight Generation
//!
//! Asks a generative model to explain the correct answer of a question. This
//! is an optional enrichment: the pipeline treats every failure here as "no
//! insight" and keeps going.

use rig::agent::{Agent, AgentBuilder};
use rig::completion::{CompletionModel, Prompt, PromptError};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::question::Question;

/// System preamble given to the model
pub const EXPERT_PREAMBLE: &str =
    "You are a Google Cloud Certified Professional Cloud Architect expert.";

/// Error type for insight generation
#[derive(Debug, Error)]
pub enum InsightError {
    /// The completion request failed
    #[error("completion failed: {0}")]
    Prompt(#[from] PromptError),

    /// The model answered with nothing
    #[error("model returned an empty insight")]
    Empty,
}

/// Generates answer explanations with a completion model
pub struct InsightGenerator<M: CompletionModel> {
    agent: Agent<M>,
}

impl<M: CompletionModel> InsightGenerator<M> {
    /// Create a generator using the default expert preamble
    pub fn new(model: M) -> Self {
        Self::with_preamble(model, EXPERT_PREAMBLE)
    }

    /// Create a generator with a custom preamble
    pub fn with_preamble(model: M, preamble: &str) -> Self {
        Self {
            agent: AgentBuilder::new(model).preamble(preamble).build(),
        }
    }

    /// Request an explanation for one question
    #[instrument(skip_all, fields(options = question.options.len()))]
    pub async fn generate(&self, question: &Question) -> Result<String, InsightError> {
        let response = self.agent.prompt(insight_prompt(question)).await?;
        let insight = response.trim();
        if insight.is_empty() {
            return Err(InsightError::Empty);
        }

        debug!("Generated insight of length {}", insight.len());
        Ok(insight.to_string())
    }
}

/// Build the prompt sent for a question
pub fn insight_prompt(question: &Question) -> String {
    format!(
        "Please analyze the following question and options:\n\n\
         Question: {}\n\n\
         Options:\n{}\n\n\
         Provide the correct answer letter(s) and a concise technical explanation of why it is correct and why the others are incorrect.\n\
         Format as:\n\
         **Correct Answer:** [Letter]\n\
         **Explanation:** [Explanation]",
        question.prompt,
        question.options.join("\n")
    )
}
