//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::path::Path;

/// Trait for question generation model operations
///
/// Implemented by the infrastructure layer (pdfquiz-llm)
pub trait QuestionGenerator {
    /// Error type for generation operations
    type Error;

    /// Generate text for a prompt, capped at `max_length` tokens
    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, Self::Error>;

    /// Human-readable model identifier (e.g. `ollama:llama3.2`)
    fn model_name(&self) -> String;
}

/// Trait for pulling plain text out of a document file
///
/// Implemented by the infrastructure layer (pdfquiz-pdf). Extraction never
/// fails from the caller's perspective: an empty string means no text.
pub trait TextExtractor {
    /// Extract all text from the document at `path`
    fn extract_text(&self, path: &Path) -> String;
}
