//! Session History Store
//!
//! Append-only log of session records, one backing store per habit. The
//! store interface is explicit so the CSV implementation can be swapped for
//! an in-memory one in tests. Loading is tolerant: a corrupt or truncated
//! row is skipped with a warning and never prevents recovery of the rest of
//! the history.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use habitduel_algo::ScoreWindow;

use crate::models::{RatingState, SessionRecord};
use crate::StoreResult;

/// Fixed leading columns of every history file; one column per parameter
/// follows, fixed at file creation from the first record's keys.
pub const FIXED_COLUMNS: [&str; 5] = ["session", "total_score", "adv_score", "delta", "rating"];

// ============================================================
// Store interface
// ============================================================

/// Append-only, per-habit session log
pub trait HistoryStore {
    /// Append one record, creating the backing store with its header if this
    /// is the first record. Never rewrites or reorders prior records.
    fn append(&mut self, record: &SessionRecord) -> StoreResult<()>;

    /// Iterate records in original append order
    ///
    /// The iteration is lazy and restartable: each call starts over from the
    /// beginning. Malformed rows are skipped, a missing store yields an
    /// empty iteration.
    fn load_all(&self) -> StoreResult<Box<dyn Iterator<Item = SessionRecord>>>;

    /// Remove the habit's entire history; idempotent
    fn delete(&mut self) -> StoreResult<()>;
}

// ============================================================
// State reconstruction
// ============================================================

/// Rebuild rating state by replaying a habit's history
///
/// The rating tracks the last record's `rating` field (falling back to
/// `initial_rating` with no records) and the window holds the total scores
/// of the last `capacity` records in chronological order. Also returns the
/// record count, which is the next session index.
pub fn replay_state(
    store: &dyn HistoryStore,
    initial_rating: f64,
    k_factor: f64,
    capacity: usize,
) -> StoreResult<(RatingState, u64)> {
    let mut rating = initial_rating;
    let mut window = ScoreWindow::new(capacity);
    let mut count = 0u64;

    for record in store.load_all()? {
        rating = record.rating;
        window.push(record.total_score);
        count += 1;
    }

    Ok((
        RatingState {
            rating,
            k_factor,
            window,
        },
        count,
    ))
}

// ============================================================
// CSV implementation
// ============================================================

/// CSV-backed history store, one `habit_<name>.csv` per habit
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    pub fn new<P: AsRef<Path>>(data_dir: P, habit_name: &str) -> Self {
        let file_name = format!("habit_{}.csv", sanitize_file_name(habit_name));
        Self {
            path: data_dir.as_ref().join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for CsvHistoryStore {
    fn append(&mut self, record: &SessionRecord) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let needs_header = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);

        if needs_header {
            let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
            header.extend(record.values.keys().map(String::as_str));
            writer.write_record(&header)?;
        }

        let mut row = vec![
            record.session.to_string(),
            record.total_score.to_string(),
            record.adv_score.to_string(),
            record.delta.to_string(),
            record.rating.to_string(),
        ];
        row.extend(record.values.values().map(|v| v.to_string()));
        writer.write_record(&row)?;
        writer.flush()?;

        debug!("appended session {} to {}", record.session, self.path.display());
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Box<dyn Iterator<Item = SessionRecord>>> {
        if !self.path.exists() {
            return Ok(Box::new(std::iter::empty()));
        }

        // flexible: row arity mismatches surface as short rows to be
        // skipped, not reader errors that would abort the whole load
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let params: Vec<String> = reader
            .headers()?
            .iter()
            .skip(FIXED_COLUMNS.len())
            .map(String::from)
            .collect();
        let path = self.path.clone();

        let records = reader.into_records().filter_map(move |row| match row {
            Ok(row) => {
                let parsed = parse_row(&row, &params);
                if parsed.is_none() {
                    warn!("skipping malformed history row in {}", path.display());
                }
                parsed
            }
            Err(err) => {
                warn!("skipping unreadable history row in {}: {err}", path.display());
                None
            }
        });

        Ok(Box::new(records))
    }

    fn delete(&mut self) -> StoreResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Parse one data row against the header's parameter columns
///
/// Any unparseable numeric field or missing column disqualifies the row.
fn parse_row(row: &csv::StringRecord, params: &[String]) -> Option<SessionRecord> {
    let session = row.get(0)?.trim().parse::<u64>().ok()?;
    let total_score = parse_field(row.get(1)?)?;
    let adv_score = parse_field(row.get(2)?)?;
    let delta = parse_field(row.get(3)?)?;
    let rating = parse_field(row.get(4)?)?;

    let mut values = BTreeMap::new();
    for (i, param) in params.iter().enumerate() {
        let field = row.get(FIXED_COLUMNS.len() + i)?;
        values.insert(param.clone(), parse_field(field)?);
    }

    Some(SessionRecord {
        session,
        total_score,
        adv_score,
        delta,
        rating,
        values,
    })
}

fn parse_field(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

/// Keep habit-derived file names portable
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

// ============================================================
// In-memory implementation
// ============================================================

/// In-memory history store for tests and embedding
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Vec<SessionRecord>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, record: &SessionRecord) -> StoreResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Box<dyn Iterator<Item = SessionRecord>>> {
        Ok(Box::new(self.records.clone().into_iter()))
    }

    fn delete(&mut self) -> StoreResult<()> {
        self.records.clear();
        Ok(())
    }
}

// ============================================================
// Tests
// ============================================================
