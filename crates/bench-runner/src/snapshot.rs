//! Snapshot persistence for one benchmark run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use mate_core::EvaluationResult;
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// The persisted shape the dashboard reads. Failed evaluation units are
/// simply absent from `results`, never recorded as incorrect.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub models: Vec<String>,
    pub puzzle_count: usize,
    /// model -> puzzle id -> result.
    pub results: BTreeMap<String, BTreeMap<String, EvaluationResult>>,
}

/// Write the snapshot via a temp file and rename, so a crash mid-write
/// never leaves a truncated snapshot behind.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), RunnerError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
