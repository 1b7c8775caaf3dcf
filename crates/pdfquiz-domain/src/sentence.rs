//! Sentence module - a unit of document text considered for questioning

use std::fmt;

/// A sentence taken verbatim from a document
///
/// Sentences have no identity beyond their content; two sentences with the
/// same text are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    content: String,
}

impl Sentence {
    /// Create a sentence from its text
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfquiz_domain::Sentence;
    ///
    /// let s = Sentence::new("The quick brown fox jumps over the dog.");
    /// assert_eq!(s.word_count(), 8);
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The sentence text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// True when the text, ignoring `.` characters and surrounding
    /// whitespace, is made of digits only (page numbers, footers)
    pub fn is_numeric(&self) -> bool {
        let stripped: String = self.content.trim().chars().filter(|c| *c != '.').collect();
        !stripped.is_empty() && stripped.chars().all(|c| c.is_numeric())
    }

    /// Consume the sentence, returning its text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl From<&str> for Sentence {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sentence {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(Sentence::new("").word_count(), 0);
        assert_eq!(Sentence::new("one").word_count(), 1);
        assert_eq!(Sentence::new("  spaced   out\twords\n here ").word_count(), 4);
    }

    #[test]
    fn test_is_numeric() {
        assert!(Sentence::new("42").is_numeric());
        assert!(Sentence::new(" 3.14 ").is_numeric());
        assert!(Sentence::new("12.").is_numeric());
        assert!(!Sentence::new("...").is_numeric());
        assert!(!Sentence::new("Page 12").is_numeric());
        assert!(!Sentence::new("1 2 3").is_numeric());
    }

    #[test]
    fn test_value_equality() {
        let a = Sentence::new("Same text here.");
        let b: Sentence = "Same text here.".into();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Same text here.");
    }
}
