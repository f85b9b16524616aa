//! Puzzle records and difficulty levels.

use serde::{Deserialize, Serialize};

/// Puzzle difficulty class. Each level maps to a fixed number of scored
/// plies: the solving side's moves plus the opponent's forced replies up to
/// the final mate (2N-1 for mate in N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveLevel {
    MateIn1,
    MateIn2,
    MateIn3,
}

impl MoveLevel {
    /// Number of plies a candidate line must contain to be scored.
    pub fn required_plies(self) -> usize {
        match self {
            MoveLevel::MateIn1 => 1,
            MoveLevel::MateIn2 => 3,
            MoveLevel::MateIn3 => 5,
        }
    }

    /// Full moves by the solving side, for prompt text.
    pub fn mate_in(self) -> usize {
        match self {
            MoveLevel::MateIn1 => 1,
            MoveLevel::MateIn2 => 2,
            MoveLevel::MateIn3 => 3,
        }
    }

    /// Map a solution length back to a level.
    pub fn from_plies(plies: usize) -> Option<Self> {
        match plies {
            1 => Some(MoveLevel::MateIn1),
            3 => Some(MoveLevel::MateIn2),
            5 => Some(MoveLevel::MateIn3),
            _ => None,
        }
    }
}

/// Immutable input to one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub level: MoveLevel,
    /// Starting position descriptor (FEN).
    pub fen: String,
    /// Known solution line: space-joined UCI moves, length equal to the
    /// level's required ply count.
    pub solution: String,
    /// Opponent's move that produced the puzzle position. Context for the
    /// prompt only, never scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_move: Option<String>,
}
