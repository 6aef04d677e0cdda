//! # habitduel-algo - Habit duel rating engine
//!
//! Pure-Rust implementation of the scoring engine behind habit duels:
//!
//! - **Weighted scoring** - Converts user-entered parameter values into a total score
//! - **Adversary sampling** - Draws an opposing score range calibrated to past sessions
//! - **ELO rating update** - Updates a persistent skill rating from the session outcome
//! - **Score window** - Fixed-capacity sliding window over recent total scores
//!
//! ## Design goals
//!
//! - **Pure computation** - No file I/O; persistence lives in `habitduel-store`
//! - **Explicit context** - Every call receives the habit's weights, history, and
//!   rating state explicitly; the engine keeps no ambient selection state
//! - **Deterministic where it matters** - Scoring and rating updates are pure
//!   functions; only adversary sampling is randomized, and the generator can be
//!   seeded for reproducible tests
//!
//! ## Modules
//!
//! - [`score`] - Weighted score computation
//! - [`adversary`] - Adversary range selection and sampling
//! - [`rating`] - ELO-style expected score and rating delta
//! - [`window`] - Sliding window over recent total scores
//! - [`stats`] - Mean and sample standard deviation helpers
//! - [`types`] - Shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use habitduel_algo::{weighted_score, update_rating, AdversaryGenerator, Difficulty};
//!
//! let weights = BTreeMap::from([("pushups".to_string(), 2.0)]);
//! let values = BTreeMap::from([("pushups".to_string(), 15.0)]);
//!
//! let score = weighted_score(&values, &weights);
//!
//! let mut generator = AdversaryGenerator::with_seed(42);
//! let draw = generator.generate(Difficulty::Normal, &[], &weights);
//!
//! let update = update_rating(500.0, 20.0, score, draw.actual);
//! assert_eq!(update.rating, 500.0 + update.delta);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod adversary;
pub mod rating;
pub mod score;
pub mod stats;
pub mod types;
pub mod window;

// ============================================================================
// Re-exports
// ============================================================================

pub use adversary::AdversaryGenerator;
pub use rating::{expected_score, update_rating};
pub use score::weighted_score;
pub use types::{
    AdversaryDraw, Difficulty, RatingUpdate, DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR,
    DEFAULT_WINDOW_CAPACITY,
};
pub use window::ScoreWindow;
