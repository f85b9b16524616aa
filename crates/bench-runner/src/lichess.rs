//! Puzzle fetching from the Lichess puzzle API.

use mate_core::{MoveLevel, Puzzle};
use reqwest::Client;
use serde_json::Value;
use shakmaty::{fen::Fen, san::SanPlus, CastlingMode, Chess, EnPassantMode, Position};

use crate::error::RunnerError;

pub struct LichessClient {
    client: Client,
}

impl LichessClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("matebench/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self { client }
    }

    /// Fetch one puzzle by id and map it into the internal shape. The API
    /// gives the source game's moves rather than a FEN, so the puzzle
    /// position is re-derived by replaying them.
    pub async fn fetch_puzzle(&self, id: &str) -> Result<Puzzle, RunnerError> {
        let url = format!("https://lichess.org/api/puzzle/{id}");

        // Rate limit
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RunnerError::Puzzles(format!("Request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(RunnerError::Puzzles(format!("HTTP {}", resp.status())));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| RunnerError::Puzzles(format!("JSON parse error: {e}")))?;

        puzzle_from_api(id, &data)
    }
}

fn puzzle_from_api(id: &str, data: &Value) -> Result<Puzzle, RunnerError> {
    let solution: Vec<&str> = data["puzzle"]["solution"]
        .as_array()
        .map(|moves| moves.iter().filter_map(|m| m.as_str()).collect())
        .unwrap_or_default();
    if solution.is_empty() {
        return Err(RunnerError::Puzzles(format!("puzzle {id}: no solution line")));
    }

    let level = MoveLevel::from_plies(solution.len()).ok_or_else(|| {
        RunnerError::Puzzles(format!(
            "puzzle {id}: {}-ply solution is not a mate-in-1/2/3",
            solution.len()
        ))
    })?;

    let initial_ply = data["puzzle"]["initialPly"]
        .as_u64()
        .ok_or_else(|| RunnerError::Puzzles(format!("puzzle {id}: missing initialPly")))? as usize;

    let moves = data["game"]["pgn"]
        .as_str()
        .ok_or_else(|| RunnerError::Puzzles(format!("puzzle {id}: missing game moves")))?;

    // The puzzle position is the game after initialPly + 1 plies; the last
    // of them is the opponent move that set the puzzle up.
    let mut pos = Chess::default();
    let mut last_move = None;
    for san_str in moves.split_whitespace().take(initial_ply + 1) {
        let san: SanPlus = san_str
            .parse()
            .map_err(|_| RunnerError::Puzzles(format!("puzzle {id}: bad SAN '{san_str}'")))?;
        let legal_move = san
            .san
            .to_move(&pos)
            .map_err(|_| RunnerError::Puzzles(format!("puzzle {id}: illegal move '{san_str}'")))?;
        last_move = Some(legal_move.to_uci(CastlingMode::Standard).to_string());
        pos.play_unchecked(legal_move);
    }

    let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();

    Ok(Puzzle {
        id: id.to_string(),
        level,
        fen,
        solution: solution.join(" "),
        last_move,
    })
}
