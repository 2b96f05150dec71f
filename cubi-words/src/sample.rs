//! Sampling without replacement.

use std::collections::HashSet;

use rand::Rng;

use cubi_core::constants::ID_SEPARATOR;
use cubi_core::error::{CubiError, Result};

/// Draws `n` distinct elements of `population` uniformly at random.
///
/// Uses rejection sampling: draw an index, keep it unless already chosen.
/// At every step each not-yet-chosen index is equally likely, so every
/// subset of size `n` is too. Elements come back in draw order.
///
/// Fails with [`CubiError::InsufficientPopulation`] before drawing anything
/// when `n` exceeds the population size.
pub fn sample<'a, T, R>(rng: &mut R, population: &'a [T], n: usize) -> Result<Vec<&'a T>>
where
    R: Rng + ?Sized,
{
    let m = population.len();
    if n > m {
        return Err(CubiError::InsufficientPopulation {
            requested: n,
            available: m,
        });
    }

    let mut chosen = HashSet::with_capacity(n);
    let mut result = Vec::with_capacity(n);
    while result.len() < n {
        let j = rng.gen_range(0..m);
        if chosen.insert(j) {
            result.push(&population[j]);
        }
    }
    Ok(result)
}

/// Samples `n` words and joins them into a candidate identifier.
pub fn create_identifier<R>(rng: &mut R, words: &[String], n: usize) -> Result<String>
where
    R: Rng + ?Sized,
{
    let picked = sample(rng, words, n)?;
    Ok(picked
        .iter()
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(ID_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn letters() -> Vec<String> {
        ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sample_size() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let population = letters();
        let s = sample(&mut rng, &population, 2).unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_sample_invalid_size() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let population = letters();
        let result = sample(&mut rng, &population, 5);
        assert!(matches!(
            result,
            Err(CubiError::InsufficientPopulation { requested: 5, available: 4 })
        ));
    }

    #[test]
    fn test_sample_whole_population() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let population = letters();
        let mut s: Vec<_> = sample(&mut rng, &population, 4).unwrap();
        s.sort();
        assert_eq!(s, population.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let population: Vec<u32> = (0..100).collect();
        let a = sample(&mut ChaCha20Rng::seed_from_u64(42), &population, 10).unwrap();
        let b = sample(&mut ChaCha20Rng::seed_from_u64(42), &population, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_roughly_uniform() {
        let population: Vec<usize> = (0..5).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut counts = [0usize; 5];

        for _ in 0..10_000 {
            for &i in sample(&mut rng, &population, 2).unwrap() {
                counts[i] += 1;
            }
        }

        // Each element is expected in 2/5 of the draws
        for count in counts {
            assert!((3_600..4_400).contains(&count), "count {} out of range", count);
        }
    }

    #[test]
    fn test_create_identifier() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let words = letters();
        let id = create_identifier(&mut rng, &words, 3).unwrap();

        let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| words.iter().any(|w| w == p)));
        assert_eq!(parts.iter().collect::<HashSet<_>>().len(), 3);
    }

    #[test]
    fn test_create_identifier_too_few_words() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let words = vec!["solo".to_string()];
        assert!(create_identifier(&mut rng, &words, 3).is_err());
    }

    proptest! {
        #[test]
        fn prop_sample_distinct_or_error(m in 0usize..40, n in 0usize..50, seed in any::<u64>()) {
            let population: Vec<usize> = (0..m).collect();
            let mut rng = ChaCha20Rng::seed_from_u64(seed);

            match sample(&mut rng, &population, n) {
                Ok(picked) => {
                    prop_assert!(n <= m);
                    prop_assert_eq!(picked.len(), n);
                    let distinct: HashSet<_> = picked.iter().collect();
                    prop_assert_eq!(distinct.len(), n);
                    prop_assert!(picked.iter().all(|&&i| i < m));
                }
                Err(CubiError::InsufficientPopulation { requested, available }) => {
                    prop_assert!(n > m);
                    prop_assert_eq!(requested, n);
                    prop_assert_eq!(available, m);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
