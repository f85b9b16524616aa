//! Thin adapter over the shakmaty rules engine.
//!
//! Stateless wrappers only: positions are constructed fresh from a FEN for
//! every replay, never shared between pipeline steps.

use shakmaty::{
    fen::Fen, san::San, san::SanPlus, uci::UciMove, CastlingMode, Chess, Color, File, Position,
    Rank, Square,
};

use crate::error::EvalError;

/// Build a position from a FEN string.
pub fn position_from_fen(fen: &str) -> Result<Chess, EvalError> {
    let parsed: Fen = fen.parse().map_err(|e| EvalError::InvalidFen {
        fen: fen.to_string(),
        reason: format!("{e}"),
    })?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| EvalError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })
}

/// Apply a UCI move to the position. Fails closed: returns false and leaves
/// the position untouched if the move doesn't parse or isn't legal.
pub fn apply_uci(pos: &mut Chess, uci: &str) -> bool {
    let uci_move: UciMove = match uci.parse() {
        Ok(m) => m,
        Err(_) => return false,
    };
    let legal_move = match uci_move.to_move(pos) {
        Ok(m) => m,
        Err(_) => return false,
    };
    pos.play_unchecked(legal_move);
    true
}

/// Apply a SAN token under lenient interpretation (check/mate suffixes
/// tolerated). On success the position advances and the applied move is
/// returned in UCI form; on any parse/legality/ambiguity failure the
/// position is untouched and None is returned.
pub fn apply_san_lenient(pos: &mut Chess, token: &str) -> Option<String> {
    let san_plus: SanPlus = token.parse().ok()?;
    let legal_move = san_plus.san.to_move(pos).ok()?;
    let uci = legal_move.to_uci(CastlingMode::Standard).to_string();
    pos.play_unchecked(legal_move);
    Some(uci)
}

pub fn side_to_move(pos: &Chess) -> Color {
    pos.turn()
}

/// Convert a single UCI move to SAN at a given position, for display.
/// Never fails: unparseable or illegal input comes back unchanged.
pub fn uci_to_san(pos: &Chess, uci_str: &str) -> String {
    try_uci_to_san(pos, uci_str).unwrap_or_else(|| uci_str.to_string())
}

fn try_uci_to_san(pos: &Chess, uci_str: &str) -> Option<String> {
    let uci_move: UciMove = uci_str.parse().ok()?;
    let legal_move = uci_move.to_move(pos).ok()?;
    Some(San::from_move(pos, legal_move).to_string())
}

/// ASCII board diagram, rank 8 at the top, for prompt construction.
pub fn board_diagram(pos: &Chess) -> String {
    let board = pos.board();
    let mut out = String::new();
    for rank in (0..8u32).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8u32 {
            let square = Square::from_coords(File::new(file), Rank::new(rank));
            match board.piece_at(square) {
                Some(piece) => out.push(piece.char()),
                None => out.push('.'),
            }
            if file < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}
