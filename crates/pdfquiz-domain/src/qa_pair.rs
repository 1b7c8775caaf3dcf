//! QA pair module - the output of question generation

/// A generated question paired with the sentence that answers it
///
/// The answer is always the source sentence verbatim. Pairs are immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaPair {
    question: String,
    answer: String,
}

impl QaPair {
    /// Create a new pair
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The generated question
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The source sentence
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Split into `(question, answer)`
    pub fn into_parts(self) -> (String, String) {
        (self.question, self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let pair = QaPair::new("What colour is the sky?", "The sky is blue.");
        assert_eq!(pair.question(), "What colour is the sky?");
        assert_eq!(pair.answer(), "The sky is blue.");

        let (q, a) = pair.into_parts();
        assert_eq!(q, "What colour is the sky?");
        assert_eq!(a, "The sky is blue.");
    }
}
