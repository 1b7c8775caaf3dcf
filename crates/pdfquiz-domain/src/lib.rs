//! PDF Quiz Domain Layer
//!
//! This crate contains the domain model for turning documents into quizzes.
//! It has no external dependencies and defines the value objects and trait
//! interfaces that the other crates depend upon.
//!
//! ## Key Concepts
//!
//! - **Sentence**: a verbatim unit of document text
//! - **QaPair**: a generated question paired with its source sentence
//! - **QuestionGenerator**: the model boundary
//! - **TextExtractor**: the document parsing boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod prompt;
pub mod qa_pair;
pub mod sentence;
pub mod traits;

// Re-exports for convenience
pub use qa_pair::QaPair;
pub use sentence::Sentence;
