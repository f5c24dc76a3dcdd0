use rand::{seq::SliceRandom, Rng};

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Fisher-Yates over a copy of `items`, drawing from `rng`.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let input = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let mut output = shuffle(&input);
        assert_eq!(output.len(), input.len());
        output.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn test_shuffle_handles_empty_and_single() {
        let empty: Vec<u8> = vec![];
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&["only"]), vec!["only"]);
    }

    #[test]
    fn test_shuffle_with_seeded_rng_is_deterministic() {
        let input = vec!["a", "b", "c", "d"];
        let first = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        let second = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation_evenly() {
        let input = [0u8, 1, 2];
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let rounds = 60_000;

        for _ in 0..rounds {
            *counts.entry(shuffle_with(&input, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = rounds / 6;
        for (perm, count) in counts {
            let deviation = (count as f64 - expected as f64).abs() / expected as f64;
            assert!(
                deviation < 0.05,
                "permutation {:?} drawn {} times, expected about {}",
                perm,
                count,
                expected
            );
        }
    }
}
