//! Data Models
//!
//! Shared records for persistence and the manager surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use habitduel_algo::ScoreWindow;

/// A tracked habit: unique name plus parameter weight mapping
///
/// Weights are keyed by parameter name; `BTreeMap` gives a stable order for
/// display and for the history file's value columns. Edits replace the whole
/// mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitDefinition {
    pub name: String,
    pub params: BTreeMap<String, f64>,
}

/// Per-habit rating state, owned by exactly one habit
///
/// Mutated only by the session submission path and rebuilt from history on
/// load. The rating always equals the `rating` field of the most recent
/// [`SessionRecord`], or the configured initial value when none exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    pub k_factor: f64,
    pub window: ScoreWindow,
}

/// One appended session, immutable once written
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Zero-based session index within the habit's history
    pub session: u64,
    /// Computed weighted total score
    pub total_score: f64,
    /// Adversary score actually faced (the submission-time draw)
    pub adv_score: f64,
    /// Rating change applied by this session
    pub delta: f64,
    /// Rating after applying the delta
    pub rating: f64,
    /// Raw per-parameter input values
    pub values: BTreeMap<String, f64>,
}

/// Session outcome as rendered to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Victory,
    Draw,
    Defeat,
}

impl SessionOutcome {
    pub fn from_scores(user_score: f64, adversary_score: f64) -> Self {
        if user_score > adversary_score {
            SessionOutcome::Victory
        } else if user_score == adversary_score {
            SessionOutcome::Draw
        } else {
            SessionOutcome::Defeat
        }
    }
}

/// Everything the UI needs to render one submitted session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Lower bound of the range previewed to the user
    pub range_low: f64,
    /// Upper bound of the range previewed to the user
    pub range_high: f64,
    /// Adversary score faced (independent draw from the same range)
    pub adv_actual: f64,
    pub user_score: f64,
    pub outcome: SessionOutcome,
    pub delta: f64,
    /// Rating after this session
    pub rating: f64,
}

// ============================================================
// Tests
// ============================================================
