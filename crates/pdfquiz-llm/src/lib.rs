//! PDF Quiz Model Provider Layer
//!
//! Pluggable question generation providers.
//!
//! # Architecture
//!
//! This crate provides implementations of the `QuestionGenerator` trait from
//! `pdfquiz-domain`. Every provider shares [`LlmError`] so they can be used
//! interchangeably behind [`DynQuestionGenerator`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `HuggingFaceProvider`: Hugging Face inference API (text2text models)
//!
//! # Examples
//!
//! ```
//! use pdfquiz_llm::MockProvider;
//! use pdfquiz_domain::traits::QuestionGenerator;
//!
//! let provider = MockProvider::new("What is the answer?");
//! let result = provider.generate("test prompt", 128).unwrap();
//! assert_eq!(result, "What is the answer?");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod huggingface;
pub mod ollama;
mod retry;

use pdfquiz_domain::traits::QuestionGenerator;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::{build_provider, ModelConfig, ProviderKind};
pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;

/// A question generator shared across requests
pub type DynQuestionGenerator = dyn QuestionGenerator<Error = LlmError> + Send + Sync;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Run an async provider call to completion from synchronous code.
///
/// Must be called off the async worker threads (e.g. inside
/// `tokio::task::spawn_blocking`).
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

/// Mock question generator for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use pdfquiz_llm::MockProvider;
/// use pdfquiz_domain::traits::QuestionGenerator;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed question?");
/// assert_eq!(provider.generate("any prompt", 128).unwrap(), "Fixed question?");
///
/// // Per-prompt responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "question1");
/// provider.add_response("prompt2", "question2");
/// assert_eq!(provider.generate("prompt1", 128).unwrap(), "question1");
/// assert_eq!(provider.generate("prompt2", 128).unwrap(), "question2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
    last_max_length: Arc<Mutex<Option<usize>>>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Error,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_max_length: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.lock_responses()
            .insert(prompt.into(), MockResponse::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.lock_responses().insert(prompt.into(), MockResponse::Error);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) = 0;
    }

    /// The `max_length` passed on the most recent call
    pub fn last_max_length(&self) -> Option<usize> {
        *self.last_max_length.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, HashMap<String, MockResponse>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("What does this sentence describe?")
    }
}

impl QuestionGenerator for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        *self.last_max_length.lock().unwrap_or_else(|e| e.into_inner()) = Some(max_length);

        match self.lock_responses().get(prompt) {
            Some(MockResponse::Text(response)) => Ok(response.clone()),
            Some(MockResponse::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> String {
        "mock".to_string()
    }
}
