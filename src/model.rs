//! # LLM Model Module
//!
//! Builds the completion model used for AI insights, with built-in rate
//! limiting so a long batch never exhausts the provider quota.
//!
//! ## Key Components
//!
//! - `RateLimitedCompletionModel`: wraps any completion model with a `governor` limiter
//! - `gemini`: a rate-limited Gemini completion model
//! - `gemini_from_env`: the same, keyed from `GEMINI_API_KEY`, or nothing when unset

use std::num::NonZeroU32;

use governor::{Quota, RateLimiter};
use rig::providers::gemini;

pub mod ratelimited_completion;

#[cfg(test)]
pub(crate) mod mock_model;

pub use ratelimited_completion::RateLimitedCompletionModel;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Free-tier request quota
pub const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(30).unwrap();

/// Rate-limited Gemini completion model
pub type GeminiModel = RateLimitedCompletionModel<gemini::completion::CompletionModel>;

/// Create a rate-limited Gemini completion model
pub fn gemini(api_key: &str, model: &str, requests_per_minute: NonZeroU32) -> GeminiModel {
    let client = gemini::Client::new(api_key);
    let limiter = RateLimiter::direct(Quota::per_minute(requests_per_minute));
    RateLimitedCompletionModel::new(client.completion_model(model), limiter)
}

/// Create a Gemini model from the environment, or `None` when no key is set
pub fn gemini_from_env(model: &str, requests_per_minute: NonZeroU32) -> Option<GeminiModel> {
    let api_key = std::env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())?;
    Some(gemini(&api_key, model, requests_per_minute))
}
