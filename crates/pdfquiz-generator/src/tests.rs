//! End-to-end tests for the generator

#[cfg(test)]
mod tests {
    use crate::{GeneratorConfig, QaAssembler, SentenceSegmenter};
    use pdfquiz_domain::prompt::question_prompt;
    use pdfquiz_domain::Sentence;
    use pdfquiz_llm::MockProvider;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const DOCUMENT: &str = "Photosynthesis converts light energy into chemical energy in plants. \
        The process takes place mainly inside the chloroplasts of leaf cells. \
        Page 3. \
        Chlorophyll absorbs mostly blue and red wavelengths of visible light. \
        Oxygen is released into the atmosphere as a by-product of the reaction. \
        42. \
        Glucose produced by the plant is stored as starch for later use.";

    fn assembler(provider: MockProvider) -> QaAssembler<MockProvider> {
        QaAssembler::new(Arc::new(provider), GeneratorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_full_generation_flow() {
        let provider = MockProvider::new("What happens in this step?");
        let assembler = assembler(provider.clone());
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = assembler.generate_from_text(DOCUMENT, 3, &mut rng).await;

        assert_eq!(outcome.available, 5);
        assert_eq!(outcome.sampled, 3);
        assert_eq!(outcome.pairs.len(), 3);
        assert_eq!(provider.call_count(), 3);

        let qualifying = SentenceSegmenter::default().segment(DOCUMENT);
        for pair in &outcome.pairs {
            assert!(qualifying.iter().any(|s| s.content() == pair.answer()));
            assert!(DOCUMENT.contains(pair.answer()));
        }
    }

    #[tokio::test]
    async fn test_fewer_sentences_than_requested() {
        let provider = MockProvider::new("What happens in this step?");
        let assembler = assembler(provider);
        let mut rng = StdRng::seed_from_u64(5);

        let text = "Only this single sentence is long enough to qualify here. Short one.";
        let outcome = assembler.generate_from_text(text, 5, &mut rng).await;

        assert_eq!(outcome.sampled, 1);
        assert_eq!(outcome.pairs.len(), 1);
    }

    #[tokio::test]
    async fn test_no_qualifying_sentences() {
        let provider = MockProvider::new("What?");
        let assembler = assembler(provider.clone());
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = assembler.generate_from_text("Too short. 12. 13.", 5, &mut rng).await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.available, 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_same_seed_same_selection() {
        let assembler = assembler(MockProvider::new("What happens in this step?"));

        let first = assembler
            .generate_from_text(DOCUMENT, 2, &mut StdRng::seed_from_u64(99))
            .await;
        let second = assembler
            .generate_from_text(DOCUMENT, 2, &mut StdRng::seed_from_u64(99))
            .await;

        assert_eq!(first.pairs, second.pairs);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_pairs_bounded_and_contained(
            count in 0usize..12,
            n in 1usize..=20,
            seed in any::<u64>(),
            echo_every in 1usize..4,
        ) {
            let sentences: Vec<Sentence> = (0..count)
                .map(|i| Sentence::new(format!("Sentence number {} has plenty of words.", i)))
                .collect();

            let mut provider = MockProvider::new("Which number is mentioned?");
            for (i, s) in sentences.iter().enumerate() {
                if i % echo_every == 0 {
                    provider.add_response(question_prompt(s.content()), s.content());
                }
            }
            let assembler = assembler(provider);
            let mut rng = StdRng::seed_from_u64(seed);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let outcome = runtime.block_on(assembler.assemble(&sentences, n, &mut rng));

            prop_assert!(outcome.pairs.len() <= n.min(sentences.len()));
            for pair in &outcome.pairs {
                prop_assert!(sentences.iter().any(|s| s.content() == pair.answer()));
                prop_assert_ne!(pair.question().trim(), pair.answer().trim());
            }
        }
    }
}
