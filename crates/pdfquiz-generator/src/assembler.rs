//! Core QA assembler implementation

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::sampling::sample_sentences;
use crate::segment::SentenceSegmenter;
use crate::types::AssemblyOutcome;
use pdfquiz_domain::prompt::{is_echo, question_prompt};
use pdfquiz_domain::traits::QuestionGenerator;
use pdfquiz_domain::{QaPair, Sentence};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns qualifying sentences into question/answer pairs
///
/// The generator is an injected, shared service; the assembler never
/// retries or backfills, so fewer than `n` pairs may come back.
pub struct QaAssembler<G>
where
    G: QuestionGenerator + ?Sized,
{
    generator: Arc<G>,
    segmenter: SentenceSegmenter,
    config: GeneratorConfig,
}

impl<G> QaAssembler<G>
where
    G: QuestionGenerator + Send + Sync + ?Sized + 'static,
    G::Error: std::fmt::Display,
{
    /// Create a new assembler
    pub fn new(generator: Arc<G>, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate().map_err(GeneratorError::Config)?;

        Ok(Self {
            generator,
            segmenter: SentenceSegmenter::new(config.strategy, config.min_words),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Identifier of the underlying model
    pub fn model_name(&self) -> String {
        self.generator.model_name()
    }

    /// Segment `text` and assemble up to `n` pairs from it
    pub async fn generate_from_text<R>(&self, text: &str, n: usize, rng: &mut R) -> AssemblyOutcome
    where
        R: Rng + Send,
    {
        let sentences = self.segmenter.segment(text);
        debug!("Found {} qualifying sentences", sentences.len());
        self.assemble(&sentences, n, rng).await
    }

    /// Assemble up to `min(n, sentences.len())` pairs
    ///
    /// Sentences are drawn without replacement using `rng`. Echoed questions
    /// are rejected and generation failures skipped; neither is retried.
    pub async fn assemble<R>(&self, sentences: &[Sentence], n: usize, rng: &mut R) -> AssemblyOutcome
    where
        R: Rng + Send,
    {
        let mut outcome = AssemblyOutcome {
            available: sentences.len(),
            ..AssemblyOutcome::default()
        };

        let k = n.min(sentences.len());
        if k == 0 {
            info!("Not enough content to generate questions");
            return outcome;
        }

        let selected: Vec<String> = sample_sentences(sentences, k, rng)
            .into_iter()
            .map(|s| s.content().to_string())
            .collect();
        outcome.sampled = selected.len();

        for sentence in selected {
            match self.generate_question(&sentence).await {
                Ok(question) if question.trim().is_empty() || is_echo(&question, &sentence) => {
                    debug!("Rejected degenerate question for sentence: {}", sentence);
                    outcome.rejected += 1;
                }
                Ok(question) => outcome.pairs.push(QaPair::new(question, sentence)),
                Err(e) => {
                    warn!("Error generating question: {}", e);
                    outcome.failed += 1;
                }
            }
        }

        info!(
            "Assembly complete: {} pairs from {} sampled ({} rejected, {} failed)",
            outcome.pairs.len(),
            outcome.sampled,
            outcome.rejected,
            outcome.failed
        );

        outcome
    }

    /// Call the generator for one sentence
    async fn generate_question(&self, sentence: &str) -> Result<String, GeneratorError> {
        let generator = Arc::clone(&self.generator);
        let prompt = question_prompt(sentence);
        let max_length = self.config.max_length;

        // Generation is synchronous and may block for the whole inference
        tokio::task::spawn_blocking(move || {
            generator
                .generate(&prompt, max_length)
                .map_err(|e| GeneratorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| GeneratorError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfquiz_llm::MockProvider;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts.iter().map(|t| Sentence::new(*t)).collect()
    }

    fn assembler(provider: MockProvider) -> QaAssembler<MockProvider> {
        QaAssembler::new(Arc::new(provider), GeneratorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let provider = MockProvider::new("Why?");
        let assembler = assembler(provider.clone());
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = assembler.assemble(&[], 5, &mut rng).await;
        assert!(outcome.is_empty());
        assert_eq!(outcome.sampled, 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_and_length_cap() {
        let mut provider = MockProvider::new("unexpected");
        provider.add_response(
            "Generate a question from: The river floods every spring after the thaw.",
            "When does the river flood?",
        );
        let assembler = assembler(provider.clone());
        let mut rng = StdRng::seed_from_u64(1);

        let input = sentences(&["The river floods every spring after the thaw."]);
        let outcome = assembler.assemble(&input, 5, &mut rng).await;

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].question(), "When does the river flood?");
        assert_eq!(outcome.pairs[0].answer(), input[0].content());
        assert_eq!(provider.last_max_length(), Some(128));
    }

    #[tokio::test]
    async fn test_rejects_echoes_without_backfill() {
        let a = "Alpha sentence with enough words in it.";
        let b = "Beta sentence with enough words in it.";
        let c = "Gamma sentence with enough words in it.";

        let mut provider = MockProvider::new("What is this about?");
        provider.add_response(question_prompt(a), format!("  {}  ", a));
        provider.add_response(question_prompt(b), question_prompt(b));
        let assembler = assembler(provider.clone());
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = assembler.assemble(&sentences(&[a, b, c]), 3, &mut rng).await;

        assert_eq!(outcome.sampled, 3);
        assert_eq!(outcome.rejected, 2);
        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].answer(), c);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_skipped() {
        let a = "Alpha sentence with enough words in it.";
        let b = "Beta sentence with enough words in it.";

        let mut provider = MockProvider::new("What is this about?");
        provider.add_error(question_prompt(a));
        let assembler = assembler(provider);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = assembler.assemble(&sentences(&[a, b]), 2, &mut rng).await;

        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].answer(), b);
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let provider = MockProvider::new("   ");
        let assembler = assembler(provider);
        let mut rng = StdRng::seed_from_u64(2);

        let input = sentences(&["Alpha sentence with enough words in it."]);
        let outcome = assembler.assemble(&input, 1, &mut rng).await;
        assert!(outcome.is_empty());
        assert_eq!(outcome.rejected, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            max_length: 0,
            ..GeneratorConfig::default()
        };
        let result = QaAssembler::new(Arc::new(MockProvider::default()), config);
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }
}
