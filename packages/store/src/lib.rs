//! # habitduel-store - Persistence and habit management
//!
//! File-backed state for habit duels:
//! - One JSON definitions document mapping habit name to parameters, rating,
//!   and k-factor, rewritten in full on every create/edit/delete
//! - One append-only CSV history file per habit, tolerant of corrupt rows
//! - [`HabitManager`], the surface a UI talks to: habit CRUD, adversary
//!   preview, and session submission
//!
//! All operations are synchronous and single-threaded; concurrent access to
//! one habit's files from multiple processes is unsupported.

// ============================================================
// Modules
// ============================================================

pub mod definitions;
pub mod history;
pub mod manager;
pub mod models;

// ============================================================
// Re-exports
// ============================================================

pub use definitions::{DefinitionsStore, HabitConfig};
pub use history::{replay_state, CsvHistoryStore, HistoryStore, MemoryHistoryStore};
pub use manager::{HabitManager, ManagerOptions};
pub use models::{HabitDefinition, RatingState, SessionOutcome, SessionRecord, SessionReport};

use thiserror::Error;

// ============================================================
// Error type
// ============================================================

/// Store and manager error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("definitions document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no habit named '{0}'")]
    UnknownHabit(String),

    #[error("a habit named '{0}' already exists")]
    DuplicateHabit(String),

    #[error("at least one parameter is required")]
    EmptyParams,

    #[error("invalid weight '{value}' for parameter '{param}': weights must be non-negative numbers")]
    InvalidWeight { param: String, value: String },

    #[error("no adversary generated for this session; generate one before submitting")]
    AdversaryNotGenerated,
}

pub type StoreResult<T> = Result<T, StoreError>;
