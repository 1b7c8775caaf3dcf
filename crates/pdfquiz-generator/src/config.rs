//! Configuration for question generation

use pdfquiz_domain::prompt::DEFAULT_MAX_LENGTH;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// How text is split into sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStrategy {
    /// Unicode sentence boundaries, falling back to punctuation
    #[default]
    Unicode,
    /// Split after `.`, `!` or `?` followed by whitespace
    Punctuation,
}

/// Configuration for the QA assembler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Question count used when the request gives none (or garbage)
    pub default_questions: usize,

    /// Lower bound for the requested question count
    pub min_questions: usize,

    /// Upper bound for the requested question count
    pub max_questions: usize,

    /// Sentences with this many words or fewer are skipped
    pub min_words: usize,

    /// Generation length cap passed to the model, in tokens
    pub max_length: usize,

    /// Sentence splitting strategy
    pub strategy: SegmentStrategy,
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_questions == 0 {
            return Err("min_questions must be greater than 0".to_string());
        }
        if self.min_questions > self.max_questions {
            return Err("min_questions cannot exceed max_questions".to_string());
        }
        if !(self.min_questions..=self.max_questions).contains(&self.default_questions) {
            return Err("default_questions must lie within [min_questions, max_questions]".to_string());
        }
        if self.max_length == 0 {
            return Err("max_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Clamp a requested question count into the configured range
    pub fn clamp_questions(&self, requested: i64) -> usize {
        let min = self.min_questions as i64;
        let max = self.max_questions as i64;
        requested.clamp(min, max) as usize
    }

    /// Resolve the raw `num_questions` form value
    ///
    /// Missing or non-integer input gives `default_questions`. Integers too
    /// large for `i64` clamp by sign.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfquiz_generator::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// assert_eq!(config.question_count(None), 5);
    /// assert_eq!(config.question_count(Some("abc")), 5);
    /// assert_eq!(config.question_count(Some("50")), 20);
    /// assert_eq!(config.question_count(Some("0")), 1);
    /// ```
    pub fn question_count(&self, raw: Option<&str>) -> usize {
        let Some(raw) = raw else {
            return self.default_questions;
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => self.clamp_questions(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => self.max_questions,
                IntErrorKind::NegOverflow => self.min_questions,
                _ => self.default_questions,
            },
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_questions: 5,
            min_questions: 1,
            max_questions: 20,
            min_words: 5,
            max_length: DEFAULT_MAX_LENGTH,
            strategy: SegmentStrategy::Unicode,
        }
    }
}
