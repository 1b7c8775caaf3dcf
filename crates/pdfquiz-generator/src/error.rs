//! Error types for question generation

use thiserror::Error;

/// Errors that can occur while generating questions
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Question generation model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Blocking generation task did not complete
    #[error("Generation task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
