//! Sliding Score Window
//!
//! Bounded, ordered sequence of the most recent total scores. The adversary
//! generator calibrates its ranges against this window rather than the full
//! history, so old sessions age out of the difficulty calculation.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_WINDOW_CAPACITY;

/// Fixed-capacity sliding window, oldest score evicted first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWindow {
    capacity: usize,
    scores: Vec<f64>,
}

impl ScoreWindow {
    /// Create an empty window with the given capacity (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            scores: Vec::new(),
        }
    }

    /// Build a window holding the last `capacity` items of `scores`
    pub fn from_scores<I: IntoIterator<Item = f64>>(capacity: usize, scores: I) -> Self {
        let mut window = Self::new(capacity);
        for score in scores {
            window.push(score);
        }
        window
    }

    /// Append a score, evicting the oldest entry when full
    pub fn push(&mut self, score: f64) {
        if self.scores.len() == self.capacity {
            self.scores.remove(0);
        }
        self.scores.push(score);
    }

    /// Scores in chronological order, oldest first
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for ScoreWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity_keeps_everything() {
        let mut window = ScoreWindow::new(5);
        for i in 0..3 {
            window.push(i as f64);
        }
        assert_eq!(window.as_slice(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_push_beyond_capacity_keeps_last_n_in_order() {
        let n = 30;
        let mut window = ScoreWindow::new(n);
        for i in 0..(n + 5) {
            window.push(i as f64);
        }

        assert_eq!(window.len(), n);
        let expected: Vec<f64> = (5..n + 5).map(|i| i as f64).collect();
        assert_eq!(window.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_from_scores_truncates_to_last_n() {
        let window = ScoreWindow::from_scores(3, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(window.as_slice(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut window = ScoreWindow::new(0);
        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.as_slice(), &[2.0]);
    }

    #[test]
    fn test_serde_round_trip() {
        let window = ScoreWindow::from_scores(4, vec![1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&window).unwrap();
        let back: ScoreWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, window);
        assert_eq!(back.capacity(), 4);
    }
}
