//! Prompt template sent to the question generation model

/// Prefix prepended to every sentence sent to the model
pub const QUESTION_PROMPT_PREFIX: &str = "Generate a question from: ";

/// Default generation length cap, in tokens
pub const DEFAULT_MAX_LENGTH: usize = 128;

/// Build the model prompt for a sentence
///
/// # Examples
///
/// ```
/// use pdfquiz_domain::prompt::question_prompt;
///
/// assert_eq!(
///     question_prompt("Water boils at 100 degrees."),
///     "Generate a question from: Water boils at 100 degrees."
/// );
/// ```
pub fn question_prompt(sentence: &str) -> String {
    format!("{}{}", QUESTION_PROMPT_PREFIX, sentence)
}

/// True when a generated question merely echoes its input
///
/// Both the sentence itself and the full prompt count as echoes. Comparison
/// is on trimmed text.
pub fn is_echo(question: &str, sentence: &str) -> bool {
    let question = question.trim();
    question == sentence.trim() || question == question_prompt(sentence).trim()
}
