//! Uniform sampling without replacement

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `k` distinct elements uniformly at random, in random order
///
/// Returns every element (shuffled) when `k` exceeds the slice length.
pub fn sample_sentences<'a, T, R>(items: &'a [T], k: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let k = k.min(items.len());
    let mut refs: Vec<&T> = items.iter().collect();
    let (chosen, _) = refs.partial_shuffle(rng, k);
    chosen.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_sample_is_without_replacement() {
        let items: Vec<u32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let sample = sample_sentences(&items, 20, &mut rng);
        assert_eq!(sample.len(), 20);

        let unique: HashSet<_> = sample.iter().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_sample_caps_at_len() {
        let items = vec!["a", "b", "c"];
        let mut rng = StdRng::seed_from_u64(1);

        let sample = sample_sentences(&items, 10, &mut rng);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn test_sample_is_deterministic_for_seed() {
        let items: Vec<u32> = (0..100).collect();

        let first = sample_sentences(&items, 5, &mut StdRng::seed_from_u64(42));
        let second = sample_sentences(&items, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_empty() {
        let items: Vec<u32> = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample_sentences(&items, 5, &mut rng).is_empty());
    }
}
