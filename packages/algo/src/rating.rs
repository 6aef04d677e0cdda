//! ELO-Style Rating Update
//!
//! Standard logistic expected-score curve with half-credit ties. The update
//! is deterministic given its inputs; all randomness lives in the adversary
//! generator.

use crate::types::{RatingUpdate, RATING_SCALE};

/// Expected win probability of a player at `rating` against `adversary_score`
///
/// `1 / (1 + 10^((adversary_score - rating) / 400))`. The adversary's raw
/// score stands in for an opponent rating, as in the original duel design.
pub fn expected_score(rating: f64, adversary_score: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((adversary_score - rating) / RATING_SCALE))
}

/// Apply one session outcome to a rating
///
/// Outcome is 1 for a win, 0.5 for a tie, 0 for a loss. The returned rating
/// is unbounded in both directions: there is no floor at zero and no ceiling.
pub fn update_rating(
    rating: f64,
    k_factor: f64,
    user_score: f64,
    adversary_score: f64,
) -> RatingUpdate {
    let expected = expected_score(rating, adversary_score);
    let outcome = if user_score > adversary_score {
        1.0
    } else if user_score == adversary_score {
        0.5
    } else {
        0.0
    };
    let delta = k_factor * (outcome - expected);

    RatingUpdate {
        expected,
        outcome,
        delta,
        rating: rating + delta,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_counts_as_half_credit() {
        let update = update_rating(1000.0, 32.0, 10.0, 10.0);
        assert_eq!(update.outcome, 0.5);
        // Exact formula, not rounded: adversary score 10 against rating
        // 1000 makes the win near-certain, so a mere tie costs rating.
        let exact = 1.0 / (1.0 + 10f64.powf((10.0 - 1000.0) / 400.0));
        assert!((update.expected - exact).abs() < 1e-15);
        assert!((update.delta - 32.0 * (0.5 - exact)).abs() < 1e-12);
        assert!(update.delta < 0.0);
    }

    #[test]
    fn test_tie_at_the_half_expectation_point_is_zero_delta() {
        // adversary_score == rating puts expected at exactly 0.5; a tied
        // session then cancels out.
        let update = update_rating(7.0, 32.0, 7.0, 7.0);
        assert_eq!(update.expected, 0.5);
        assert_eq!(update.delta, 0.0);
        assert_eq!(update.rating, 7.0);
    }

    #[test]
    fn test_win_against_weak_adversary_small_gain() {
        let update = update_rating(1000.0, 32.0, 15.0, 5.0);
        let expected = 1.0 / (1.0 + 10f64.powf((5.0 - 1000.0) / 400.0));
        assert_eq!(update.outcome, 1.0);
        assert!((update.expected - expected).abs() < 1e-15);
        assert!((update.delta - 32.0 * (1.0 - expected)).abs() < 1e-12);
        // A near-certain win moves the rating only slightly.
        assert!(update.delta > 0.0 && update.delta < 0.2);
        assert!((update.rating - (1000.0 + update.delta)).abs() < 1e-12);
    }

    #[test]
    fn test_loss_against_strong_adversary_small_drop() {
        let update = update_rating(1000.0, 32.0, 5.0, 1995.0);
        assert_eq!(update.outcome, 0.0);
        assert!(update.expected < 0.01);
        assert!(update.delta < 0.0 && update.delta > -0.2);
    }

    #[test]
    fn test_rating_is_unbounded_below() {
        let mut rating = 10.0;
        for _ in 0..50 {
            rating = update_rating(rating, 32.0, 0.0, 1.0).rating;
        }
        assert!(rating < 0.0);
    }

    #[test]
    fn test_expected_score_symmetry() {
        let p = expected_score(1200.0, 1000.0);
        let q = expected_score(1000.0, 1200.0);
        assert!((p + q - 1.0).abs() < 1e-12);
    }
}
