//! Definitions Document
//!
//! One JSON document maps habit name to its parameter weights, current
//! rating, and k-factor. The document is small and rewritten in full on
//! every change; it is not append-only. A missing file means "no habits
//! yet", never an error.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::StoreResult;

/// Persisted per-habit configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitConfig {
    pub params: BTreeMap<String, f64>,
    pub rating: f64,
    pub k_factor: f64,
}

/// Whole-document store for habit definitions
pub struct DefinitionsStore {
    path: PathBuf,
}

impl DefinitionsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full document; a missing file yields an empty map
    ///
    /// A present but unreadable document is surfaced as an error rather than
    /// silently dropping every habit.
    pub fn load(&self) -> StoreResult<BTreeMap<String, HabitConfig>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path)?;
        let configs = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(configs)
    }

    /// Rewrite the full document
    pub fn save(&self, configs: &BTreeMap<String, HabitConfig>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), configs)?;
        Ok(())
    }
}

// ============================================================
// Tests
// ============================================================
