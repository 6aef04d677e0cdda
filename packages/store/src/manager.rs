//! Habit Manager
//!
//! The surface a UI talks to. Habit CRUD rewrites the definitions document;
//! sessions follow the two-step protocol: `preview_adversary` shows a range
//! and arms the session, `submit_session` performs an independent second
//! draw against that same distribution, applies the ELO update, and appends
//! the record. Submitting without a preview is a precondition failure and
//! mutates nothing.
//!
//! Every call names its habit explicitly; the manager holds no "current
//! habit" selection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;

use habitduel_algo::{
    update_rating, weighted_score, AdversaryDraw, AdversaryGenerator, Difficulty, ScoreWindow,
    DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR, DEFAULT_WINDOW_CAPACITY,
};

use crate::definitions::{DefinitionsStore, HabitConfig};
use crate::history::{replay_state, CsvHistoryStore, HistoryStore};
use crate::models::{HabitDefinition, RatingState, SessionOutcome, SessionRecord, SessionReport};
use crate::{StoreError, StoreResult};

/// File name of the definitions document inside the data directory
const DEFINITIONS_FILE: &str = "habits.json";

// ============================================================
// Options
// ============================================================

/// Manager configuration
#[derive(Clone, Copy, Debug)]
pub struct ManagerOptions {
    /// Rating assigned to newly created habits
    pub initial_rating: f64,
    /// K-factor assigned to newly created habits
    pub k_factor: f64,
    /// Capacity of the per-habit sliding score window
    pub window_capacity: usize,
    /// Fixed RNG seed for reproducible adversaries (tests)
    pub seed: Option<u64>,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            initial_rating: DEFAULT_INITIAL_RATING,
            k_factor: DEFAULT_K_FACTOR,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            seed: None,
        }
    }
}

// ============================================================
// Manager
// ============================================================

struct HabitRuntime {
    definition: HabitDefinition,
    state: RatingState,
    /// Count of persisted records; doubles as the next session index
    session_count: u64,
    /// Previewed range arming the next submission
    pending: Option<AdversaryDraw>,
}

/// Habit CRUD plus the per-session scoring flow
pub struct HabitManager {
    data_dir: PathBuf,
    definitions: DefinitionsStore,
    generator: AdversaryGenerator,
    options: ManagerOptions,
    habits: BTreeMap<String, HabitRuntime>,
}

impl HabitManager {
    /// Open the manager over a data directory with default options
    pub fn open<P: AsRef<Path>>(data_dir: P) -> StoreResult<Self> {
        Self::with_options(data_dir, ManagerOptions::default())
    }

    /// Open with explicit options, loading definitions and replaying each
    /// habit's history to rebuild its rating state
    pub fn with_options<P: AsRef<Path>>(data_dir: P, options: ManagerOptions) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let definitions = DefinitionsStore::new(data_dir.join(DEFINITIONS_FILE));
        let generator = match options.seed {
            Some(seed) => AdversaryGenerator::with_seed(seed),
            None => AdversaryGenerator::new(),
        };

        let mut habits = BTreeMap::new();
        for (name, config) in definitions.load()? {
            let store = CsvHistoryStore::new(&data_dir, &name);
            // History is authoritative where it exists; the stored rating
            // only seeds habits with no records.
            let (state, session_count) =
                replay_state(&store, config.rating, config.k_factor, options.window_capacity)?;
            habits.insert(
                name.clone(),
                HabitRuntime {
                    definition: HabitDefinition {
                        name,
                        params: config.params,
                    },
                    state,
                    session_count,
                    pending: None,
                },
            );
        }

        Ok(Self {
            data_dir,
            definitions,
            generator,
            options,
            habits,
        })
    }

    // ========== Habit CRUD ==========

    /// Create a habit with the given parameter weights
    pub fn create_habit(&mut self, name: &str, params: BTreeMap<String, f64>) -> StoreResult<()> {
        if self.habits.contains_key(name) {
            return Err(StoreError::DuplicateHabit(name.to_string()));
        }
        validate_params(&params)?;

        self.habits.insert(
            name.to_string(),
            HabitRuntime {
                definition: HabitDefinition {
                    name: name.to_string(),
                    params,
                },
                state: RatingState {
                    rating: self.options.initial_rating,
                    k_factor: self.options.k_factor,
                    window: ScoreWindow::new(self.options.window_capacity),
                },
                session_count: 0,
                pending: None,
            },
        );
        self.persist_definitions()?;
        info!("created habit '{name}'");
        Ok(())
    }

    /// Replace a habit's whole parameter mapping
    pub fn update_habit_params(
        &mut self,
        name: &str,
        params: BTreeMap<String, f64>,
    ) -> StoreResult<()> {
        validate_params(&params)?;
        let runtime = self
            .habits
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownHabit(name.to_string()))?;
        runtime.definition.params = params;
        self.persist_definitions()
    }

    /// Delete a habit, cascading to its history store
    pub fn delete_habit(&mut self, name: &str) -> StoreResult<()> {
        if self.habits.remove(name).is_none() {
            return Err(StoreError::UnknownHabit(name.to_string()));
        }
        CsvHistoryStore::new(&self.data_dir, name).delete()?;
        self.persist_definitions()?;
        info!("deleted habit '{name}' and its history");
        Ok(())
    }

    // ========== Accessors ==========

    pub fn habit_names(&self) -> Vec<String> {
        self.habits.keys().cloned().collect()
    }

    pub fn habit(&self, name: &str) -> Option<&HabitDefinition> {
        self.habits.get(name).map(|r| &r.definition)
    }

    pub fn state(&self, name: &str) -> Option<&RatingState> {
        self.habits.get(name).map(|r| &r.state)
    }

    pub fn session_count(&self, name: &str) -> Option<u64> {
        self.habits.get(name).map(|r| r.session_count)
    }

    // ========== Input parsing ==========

    /// Parse user-entered `(name, weight)` text pairs into a weight mapping
    ///
    /// Parameter names are trimmed and lowercased, blank names skipped.
    /// Nothing is accepted unless every weight parses as a non-negative
    /// number and at least one parameter remains.
    pub fn parse_params(entries: &[(String, String)]) -> StoreResult<BTreeMap<String, f64>> {
        let mut params = BTreeMap::new();
        for (name, weight) in entries {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            let parsed: f64 = weight.trim().parse().map_err(|_| StoreError::InvalidWeight {
                param: name.clone(),
                value: weight.clone(),
            })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(StoreError::InvalidWeight {
                    param: name,
                    value: weight.clone(),
                });
            }
            params.insert(name, parsed);
        }
        if params.is_empty() {
            return Err(StoreError::EmptyParams);
        }
        Ok(params)
    }

    // ========== Session flow ==========

    /// First draw: preview the adversary range and arm the next submission
    pub fn preview_adversary(
        &mut self,
        name: &str,
        difficulty: Difficulty,
    ) -> StoreResult<AdversaryDraw> {
        let runtime = self
            .habits
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownHabit(name.to_string()))?;
        let draw = self.generator.generate(
            difficulty,
            runtime.state.window.as_slice(),
            &runtime.definition.params,
        );
        runtime.pending = Some(draw);
        Ok(draw)
    }

    /// Submit one session: score the inputs, draw the adversary actually
    /// faced, update the rating, and append the record
    ///
    /// The adversary faced is a fresh draw from the previewed distribution,
    /// not the preview's own sample; the preview only arms the session and
    /// supplies the range echoed back in the report.
    pub fn submit_session(
        &mut self,
        name: &str,
        difficulty: Difficulty,
        values: &BTreeMap<String, f64>,
    ) -> StoreResult<SessionReport> {
        let runtime = self
            .habits
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownHabit(name.to_string()))?;
        let preview = runtime.pending.ok_or(StoreError::AdversaryNotGenerated)?;

        let user_score = weighted_score(values, &runtime.definition.params);
        let duel = self.generator.generate(
            difficulty,
            runtime.state.window.as_slice(),
            &runtime.definition.params,
        );
        let update = update_rating(
            runtime.state.rating,
            runtime.state.k_factor,
            user_score,
            duel.actual,
        );

        // Record values under the definition's parameter keys so the file's
        // column set stays aligned with its header.
        let recorded: BTreeMap<String, f64> = runtime
            .definition
            .params
            .keys()
            .map(|p| (p.clone(), values.get(p).copied().unwrap_or(0.0)))
            .collect();
        let record = SessionRecord {
            session: runtime.session_count,
            total_score: user_score,
            adv_score: duel.actual,
            delta: update.delta,
            rating: update.rating,
            values: recorded,
        };
        CsvHistoryStore::new(&self.data_dir, name).append(&record)?;

        runtime.state.rating = update.rating;
        runtime.state.window.push(user_score);
        runtime.session_count += 1;
        runtime.pending = None;
        self.persist_definitions()?;

        Ok(SessionReport {
            range_low: preview.low,
            range_high: preview.high,
            adv_actual: duel.actual,
            user_score,
            outcome: SessionOutcome::from_scores(user_score, duel.actual),
            delta: update.delta,
            rating: update.rating,
        })
    }

    // ========== Internals ==========

    fn persist_definitions(&self) -> StoreResult<()> {
        let configs: BTreeMap<String, HabitConfig> = self
            .habits
            .iter()
            .map(|(name, runtime)| {
                (
                    name.clone(),
                    HabitConfig {
                        params: runtime.definition.params.clone(),
                        rating: runtime.state.rating,
                        k_factor: runtime.state.k_factor,
                    },
                )
            })
            .collect();
        self.definitions.save(&configs)
    }
}

/// Reject empty mappings and negative or non-finite weights
fn validate_params(params: &BTreeMap<String, f64>) -> StoreResult<()> {
    if params.is_empty() {
        return Err(StoreError::EmptyParams);
    }
    for (param, weight) in params {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(StoreError::InvalidWeight {
                param: param.clone(),
                value: weight.to_string(),
            });
        }
    }
    Ok(())
}

// ============================================================
// Tests
// ============================================================
