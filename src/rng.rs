//! Random sources for the Monte Carlo pricer.
//!
//! [`StdNormalSampler`] is the production sampler: a `StdRng` driving
//! `rand_distr::StandardNormal` (Ziggurat). It is either seeded for
//! reproducible runs or seeded from OS entropy. [`ReplaySampler`] feeds a
//! fixed sequence of draws and exists for deterministic tests and
//! scenario replays.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::models::traits::NormalSampler;

/// Seedable standard normal generator.
#[derive(Debug, Clone)]
pub struct StdNormalSampler {
    inner: StdRng,
    seed: Option<u64>,
}

impl StdNormalSampler {
    /// Reproducible sampler: the same seed always yields the same draws.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seed used at construction, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Single N(0, 1) draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }
}

impl Default for StdNormalSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl NormalSampler for StdNormalSampler {
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.sample(StandardNormal);
        }
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ReplaySampler {
    draws: Vec<f64>,
    position: usize,
}

impl ReplaySampler {
    /// Create a replay sampler. An empty sequence replays zeros.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Sampler whose every draw is zero (the median path).
    pub fn zeros() -> Self {
        Self::new(Vec::new())
    }

    /// Number of draws handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl NormalSampler for ReplaySampler {
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        if self.draws.is_empty() {
            buffer.fill(0.0);
            self.position += buffer.len();
            return;
        }
        for value in buffer.iter_mut() {
            *value = self.draws[self.position % self.draws.len()];
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::statistics::Statistics;

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = StdNormalSampler::from_seed(12345);
        let mut b = StdNormalSampler::from_seed(12345);
        let mut buf_a = vec![0.0; 64];
        let mut buf_b = vec![0.0; 64];
        a.fill_standard_normal(&mut buf_a);
        b.fill_standard_normal(&mut buf_b);
        assert_eq!(buf_a, buf_b);
        assert_eq!(a.seed(), Some(12345));
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = StdNormalSampler::from_seed(1);
        let mut b = StdNormalSampler::from_seed(2);
        assert_ne!(a.gen_normal(), b.gen_normal());
    }

    #[test]
    fn test_entropy_sampler_has_no_seed() {
        let mut sampler = StdNormalSampler::from_entropy();
        assert_eq!(sampler.seed(), None);
        assert!(sampler.gen_normal().is_finite());
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut sampler = StdNormalSampler::from_seed(42);
        let mut draws = vec![0.0; 200_000];
        sampler.fill_standard_normal(&mut draws);

        let mean = draws.iter().mean();
        let variance = draws.iter().variance();
        // Standard error of the mean is ~0.0022 at this size
        assert!(mean.abs() < 0.01, "mean = {}", mean);
        assert!((variance - 1.0).abs() < 0.02, "variance = {}", variance);
    }

    #[test]
    fn test_replay_wraps_around() {
        let mut sampler = ReplaySampler::new(vec![1.0, -1.0, 0.5]);
        let mut buf = vec![0.0; 5];
        sampler.fill_standard_normal(&mut buf);
        assert_eq!(buf, vec![1.0, -1.0, 0.5, 1.0, -1.0]);
        assert_eq!(sampler.position(), 5);

        sampler.fill_standard_normal(&mut buf[..2]);
        assert_eq!(&buf[..2], &[0.5, 1.0]);
    }

    #[test]
    fn test_replay_zeros() {
        let mut sampler = ReplaySampler::zeros();
        let mut buf = vec![7.0; 4];
        sampler.fill_standard_normal(&mut buf);
        assert!(buf.iter().all(|&z| z == 0.0));
    }
}
