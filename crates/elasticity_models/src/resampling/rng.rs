//! Seeded random number generator for resampling.
//!
//! [`ResampleRng`] wraps `StdRng` so bootstrap runs are reproducible when a
//! seed is configured and fresh otherwise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Resampling random number generator.
///
/// # Examples
///
/// ```rust
/// use elasticity_models::resampling::ResampleRng;
///
/// let mut a = ResampleRng::from_seed(7);
/// let mut b = ResampleRng::from_seed(7);
/// assert_eq!(a.sample_with_replacement(5), b.sample_with_replacement(5));
/// assert_eq!(a.seed(), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct ResampleRng {
    inner: StdRng,
    /// Seed used for initialisation, `None` when seeded from entropy.
    seed: Option<u64>,
}

impl ResampleRng {
    /// Create a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when `Some`, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }

    /// Seed used for initialisation, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw a seed for a child generator.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Uniform index in `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[inline]
    pub fn gen_index(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    /// `n` indices drawn uniformly with replacement from `0..n`.
    pub fn sample_with_replacement(&mut self, n: usize) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        (0..n).map(|_| self.gen_index(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ResampleRng::from_seed(12345);
        let mut b = ResampleRng::from_seed(12345);
        for _ in 0..10 {
            assert_eq!(a.next_seed(), b.next_seed());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = ResampleRng::from_seed(1);
        let mut b = ResampleRng::from_seed(2);
        assert_ne!(a.sample_with_replacement(50), b.sample_with_replacement(50));
    }

    #[test]
    fn test_indices_in_range() {
        let mut rng = ResampleRng::from_seed(42);
        let sample = rng.sample_with_replacement(17);
        assert_eq!(sample.len(), 17);
        assert!(sample.iter().all(|&i| i < 17));
        assert!(rng.sample_with_replacement(0).is_empty());
    }

    #[test]
    fn test_entropy_has_no_seed() {
        assert_eq!(ResampleRng::from_entropy().seed(), None);
        assert_eq!(ResampleRng::from_optional_seed(Some(3)).seed(), Some(3));
    }
}
