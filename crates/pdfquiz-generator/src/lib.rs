//! PDF Quiz Generator
//!
//! Turns document text into question/answer pairs.
//!
//! # Overview
//!
//! Text is split into sentences, short and numeric sentences are dropped,
//! and a random sample is sent to a question generation model. Each
//! generated question is paired with the sentence it came from, which
//! serves as the answer.
//!
//! # Architecture
//!
//! ```text
//! Text → SentenceSegmenter → sample → QuestionGenerator → QaPairs
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use pdfquiz_generator::{GeneratorConfig, QaAssembler};
//! use pdfquiz_llm::MockProvider;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new("Where does the river flow?"));
//! let assembler = QaAssembler::new(provider, GeneratorConfig::default())?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let text = "The river flows east towards the distant sea. It is long.";
//! let outcome = assembler.generate_from_text(text, 5, &mut rng).await;
//!
//! for pair in &outcome.pairs {
//!     println!("Q: {}\nA: {}", pair.question(), pair.answer());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod error;
mod sampling;
mod segment;
mod types;

#[cfg(test)]
mod tests;

pub use assembler::QaAssembler;
pub use config::{GeneratorConfig, SegmentStrategy};
pub use error::GeneratorError;
pub use sampling::sample_sentences;
pub use segment::{is_qualifying, split_sentences, SentenceSegmenter};
pub use types::AssemblyOutcome;
