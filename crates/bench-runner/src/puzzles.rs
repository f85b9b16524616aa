//! Local puzzle-set loading.

use std::fs;
use std::path::Path;

use mate_core::{validate, Puzzle};

use crate::error::RunnerError;

/// Load a puzzle set from a JSON file and sanity-check every entry.
pub fn load_puzzles(path: &Path) -> Result<Vec<Puzzle>, RunnerError> {
    let text = fs::read_to_string(path)?;
    let puzzles: Vec<Puzzle> = serde_json::from_str(&text)?;
    for puzzle in &puzzles {
        check_puzzle(puzzle)?;
    }
    Ok(puzzles)
}

/// A puzzle's recorded solution must replay legally from its own position
/// and score correct against itself; anything else is corrupt data.
fn check_puzzle(puzzle: &Puzzle) -> Result<(), RunnerError> {
    let need = puzzle.level.required_plies();
    let check = validate::check_line(&puzzle.fen, &puzzle.solution, need);
    if !check.legal || !validate::score_line(&puzzle.solution, &puzzle.solution) {
        return Err(RunnerError::Puzzles(format!(
            "puzzle {} has an inconsistent solution line '{}'",
            puzzle.id, puzzle.solution
        )));
    }
    Ok(())
}
