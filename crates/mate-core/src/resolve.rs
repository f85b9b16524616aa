//! Candidate-line resolution: turn extracted tokens into a move line of the
//! required length, or report that no line could be built.

use serde::{Deserialize, Serialize};

use crate::extract;
use crate::rules;

/// Which extraction method produced the candidate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMethod {
    Uci,
    San,
    None,
}

#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// Space-joined UCI moves, or empty when resolution failed.
    pub line: String,
    pub method: ParseMethod,
}

impl ResolvedLine {
    fn none() -> Self {
        ResolvedLine {
            line: String::new(),
            method: ParseMethod::None,
        }
    }
}

/// Resolve a candidate line of exactly `need` plies from raw model text.
///
/// UCI extraction wins if it yields at least `need` tokens; the first `need`
/// become the line, with legality left to the validator. Otherwise SAN
/// tokens are replayed from the puzzle's starting position under lenient
/// interpretation, skipping tokens that fail to apply, until `need` moves
/// accumulate. A line shorter than `need` is never emitted.
pub fn resolve_line(fen: &str, raw_text: &str, need: usize) -> ResolvedLine {
    if need == 0 {
        return ResolvedLine::none();
    }

    let uci = extract::uci_tokens(raw_text);
    if uci.len() >= need {
        return ResolvedLine {
            line: uci[..need].join(" "),
            method: ParseMethod::Uci,
        };
    }

    // SAN fallback: each hypothetical replay starts from a fresh position.
    if let Ok(mut pos) = rules::position_from_fen(fen) {
        let mut line: Vec<String> = Vec::with_capacity(need);
        for token in extract::san_tokens(raw_text) {
            if let Some(uci_move) = rules::apply_san_lenient(&mut pos, &token) {
                line.push(uci_move);
                if line.len() == need {
                    return ResolvedLine {
                        line: line.join(" "),
                        method: ParseMethod::San,
                    };
                }
            }
        }
    }

    ResolvedLine::none()
}
