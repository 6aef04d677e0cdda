//! Adversary Range Selection and Sampling
//!
//! The adversary is a randomly drawn opposing score. Its range is calibrated
//! to the habit's recent history: the normal band straddles the historical
//! mean, easy sits below it, hard above it. With no history at all the range
//! is derived from the configured weights instead.
//!
//! This routine is intentionally re-entrant and non-deterministic: the
//! session protocol calls it once to preview a range to the user and again,
//! independently, at submission time to draw the score actually faced. The
//! two draws share a distribution but never a sample; that property must
//! hold for outcome fairness and is covered by tests.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::stats::{mean, sample_std_dev};
use crate::types::{
    AdversaryDraw, Difficulty, COLD_START_SPREAD, SINGLE_SAMPLE_SIGMA_FACTOR, SKEWED_SIGMA_SPAN,
};

/// Adversary score generator
///
/// Owns its RNG so that tests can pin a seed while production use stays
/// entropy-seeded.
pub struct AdversaryGenerator {
    rng: ChaCha8Rng,
}

impl AdversaryGenerator {
    /// Create an entropy-seeded generator
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed (for reproducible tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw one adversary sample for the given difficulty
    ///
    /// `history` is the sliding window of past total scores, oldest first;
    /// `weights` is the habit's parameter weight mapping, used only for the
    /// cold start when `history` is empty. Degenerate inputs are permitted:
    /// a zero-variance history collapses the range to a single point.
    pub fn generate(
        &mut self,
        difficulty: Difficulty,
        history: &[f64],
        weights: &BTreeMap<String, f64>,
    ) -> AdversaryDraw {
        let (low, high) = if history.is_empty() {
            cold_start_range(weights)
        } else {
            warm_range(difficulty, history)
        };

        AdversaryDraw {
            low,
            high,
            actual: self.uniform_between(low, high),
        }
    }

    /// Uniform draw from `[low, high]`
    ///
    /// Written as `low + (high - low) * u` so a collapsed range returns the
    /// point itself and an inverted range (negative mean under the easy
    /// clamp) still yields a value between the bounds.
    fn uniform_between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.rng.gen::<f64>()
    }
}

impl Default for AdversaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Range Selection ====================

/// Cold-start band: each weight treated as if paired with a value of 1
fn cold_start_range(weights: &BTreeMap<String, f64>) -> (f64, f64) {
    let base: f64 = weights.values().sum();
    (
        base * (1.0 - COLD_START_SPREAD),
        base * (1.0 + COLD_START_SPREAD),
    )
}

/// History-calibrated band for the given difficulty
fn warm_range(difficulty: Difficulty, history: &[f64]) -> (f64, f64) {
    let mu = mean(history);
    // A single-point sample standard deviation is undefined; fall back to a
    // fixed fraction of the mean.
    let sigma = if history.len() > 1 {
        sample_std_dev(history)
    } else {
        mu * SINGLE_SAMPLE_SIGMA_FACTOR
    };

    match difficulty {
        Difficulty::Easy => ((mu - SKEWED_SIGMA_SPAN * sigma).max(0.0), mu),
        Difficulty::Hard => (mu, mu + SKEWED_SIGMA_SPAN * sigma),
        Difficulty::Normal => ((mu - sigma).max(0.0), mu + sigma),
    }
}

// ==================== Tests ====================
