//! Weighted Score Computation
//!
//! Converts user-entered parameter values into a single session score.

use std::collections::BTreeMap;

/// Compute the weighted total score for one session
///
/// Every supplied value is multiplied by its configured weight and the
/// products are summed. Parameters without a configured weight contribute 0,
/// so stray keys in `values` are harmless. Pure function, no side effects.
pub fn weighted_score(values: &BTreeMap<String, f64>, weights: &BTreeMap<String, f64>) -> f64 {
    values
        .iter()
        .map(|(param, value)| value * weights.get(param).copied().unwrap_or(0.0))
        .sum()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_weighted_score_single_param() {
        let score = weighted_score(&map(&[("a", 2.0)]), &map(&[("a", 3.0)]));
        assert_eq!(score, 6.0);
    }

    #[test]
    fn test_weighted_score_absent_weight_contributes_zero() {
        let score = weighted_score(&map(&[("a", 2.0), ("b", 1.0)]), &map(&[("a", 3.0)]));
        assert_eq!(score, 6.0);
    }

    #[test]
    fn test_weighted_score_empty_values() {
        let score = weighted_score(&map(&[]), &map(&[("a", 3.0)]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_weighted_score_linear_in_each_value() {
        let weights = map(&[("a", 3.0), ("b", 0.5)]);
        let base = weighted_score(&map(&[("a", 2.0), ("b", 4.0)]), &weights);
        let doubled_a = weighted_score(&map(&[("a", 4.0), ("b", 4.0)]), &weights);
        assert_eq!(doubled_a - base, 3.0 * 2.0);
    }

    #[test]
    fn test_weighted_score_negative_values_allowed() {
        // Inputs are caller-validated; the engine accepts any finite value.
        let score = weighted_score(&map(&[("a", -2.0)]), &map(&[("a", 3.0)]));
        assert_eq!(score, -6.0);
    }
}
