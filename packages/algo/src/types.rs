//! Shared Types and Constants
//!
//! Data structures and tuning constants used across the engine modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Initial rating assigned to a habit with no recorded sessions
pub const DEFAULT_INITIAL_RATING: f64 = 500.0;

/// Default k-factor controlling rating update magnitude
pub const DEFAULT_K_FACTOR: f64 = 20.0;

/// Default capacity of the sliding score window
pub const DEFAULT_WINDOW_CAPACITY: usize = 30;

/// Denominator of the logistic expected-score curve
pub const RATING_SCALE: f64 = 400.0;

/// Half-width of the cold-start adversary band, relative to the weight sum
pub const COLD_START_SPREAD: f64 = 0.2;

/// Stand-in sigma for a single-element history, relative to the mean
pub const SINGLE_SAMPLE_SIGMA_FACTOR: f64 = 0.2;

/// Sigma multiplier for the easy/hard one-sided ranges
pub const SKEWED_SIGMA_SPAN: f64 = 1.5;

// ==================== Difficulty ====================

/// Adversary difficulty level
///
/// Selects which side of the historical score distribution the adversary
/// range is taken from. Unrecognized textual input falls back to `Normal`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Range below the historical mean
    Easy,
    /// Range centered on the historical mean
    #[default]
    Normal,
    /// Range above the historical mean
    Hard,
}

impl Difficulty {
    /// Parse a difficulty label; anything unrecognized maps to `Normal`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }

    /// Lowercase label, matching the accepted input of [`Difficulty::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

// ==================== Engine Outputs ====================

/// One adversary sample: the selected range and the value drawn from it
///
/// Two draws with identical inputs share a range but not an `actual`; the
/// session protocol relies on that (preview draw, then an independent draw
/// at submission).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdversaryDraw {
    /// Lower bound of the sampled range
    pub low: f64,
    /// Upper bound of the sampled range
    pub high: f64,
    /// Adversary score drawn uniformly from `[low, high]`
    pub actual: f64,
}

/// Result of one ELO rating update
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Expected win probability from the logistic curve
    pub expected: f64,
    /// Realized outcome: 1 win, 0.5 tie, 0 loss
    pub outcome: f64,
    /// Applied rating change, `k * (outcome - expected)`
    pub delta: f64,
    /// Rating after applying the delta (unbounded in both directions)
    pub rating: f64,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_known_labels() {
        assert_eq!(Difficulty::parse("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::parse("normal"), Difficulty::Normal);
        assert_eq!(Difficulty::parse("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse(" Hard "), Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_parse_unrecognized_falls_back_to_normal() {
        assert_eq!(Difficulty::parse("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::parse(""), Difficulty::Normal);
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Hard);
    }
}
