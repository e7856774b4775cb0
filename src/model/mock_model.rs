//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel` trait
//! for use in tests. It returns a predefined response or error and counts the
//! requests it received, so insight behavior can be checked without API calls.

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    one_or_many::OneOrMany,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// A mock completion model for testing purposes.
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    /// Predefined response; `None` yields an empty text response
    response: Arc<Mutex<Option<OneOrMany<AssistantContent>>>>,
    /// Error message to fail with instead of responding
    failure: Arc<Mutex<Option<String>>>,
    /// Panic inside the completion call
    panics: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockCompletionModel {
    /// Creates a new mock model that will return a default empty success response.
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            panics: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the response that the mock model should return.
    pub async fn set_response(&self, response: OneOrMany<AssistantContent>) {
        let mut guard = self.response.lock().await;
        *guard = Some(response);
    }

    /// Helper to create a simple text response.
    pub async fn set_text_response(&self, text: &str) {
        let response = OneOrMany::one(AssistantContent::text(text));
        self.set_response(response).await;
    }

    /// Make every request fail with a provider error.
    pub async fn set_failure(&self, message: &str) {
        let mut guard = self.failure.lock().await;
        *guard = Some(message.to_string());
    }

    /// Make every request panic.
    pub fn set_panic(&self) {
        self.panics.store(true, Ordering::SeqCst);
    }

    /// Number of completion requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        _completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics.load(Ordering::SeqCst) {
            panic!("mock completion model panicked");
        }

        let failure = self.failure.lock().await.clone();
        if let Some(message) = failure {
            return Err(CompletionError::ProviderError(message));
        }

        let response = self.response.lock().await.clone();
        let choice = response.unwrap_or_else(|| OneOrMany::one(AssistantContent::text("")));
        Ok(CompletionResponse {
            choice,
            raw_response: String::new(),
        })
    }
}
