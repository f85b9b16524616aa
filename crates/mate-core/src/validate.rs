//! Legality and correctness validation: the final gate before scoring.

use regex::Regex;

use crate::rules;

/// Outcome of strict sequential replay of a candidate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCheck {
    /// True only if every ply applied successfully.
    pub legal: bool,
    /// Plies that applied before the first failure. Diagnostic only.
    pub applied_plies: usize,
}

impl LineCheck {
    fn rejected() -> Self {
        LineCheck {
            legal: false,
            applied_plies: 0,
        }
    }
}

/// Shape check for a single UCI token: from-square, to-square, optional
/// promotion piece. Case-insensitive.
pub fn is_uci_shaped(token: &str) -> bool {
    Regex::new(r"(?i)^[a-h][1-8][a-h][1-8][qrbn]?$")
        .unwrap()
        .is_match(token)
}

/// Normalize a move line for comparison: trim, collapse whitespace,
/// lowercase. The original text is preserved elsewhere for audit.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Replay a candidate line strictly against a fresh position derived from
/// `fen`. Rejects outright (zero applied plies) when the line is empty, has
/// the wrong token count, or contains a token that is not UCI-shaped.
pub fn check_line(fen: &str, line: &str, need: usize) -> LineCheck {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() != need {
        return LineCheck::rejected();
    }
    if tokens.iter().any(|t| !is_uci_shaped(t)) {
        return LineCheck::rejected();
    }

    let mut pos = match rules::position_from_fen(fen) {
        Ok(pos) => pos,
        Err(_) => return LineCheck::rejected(),
    };

    let mut applied = 0;
    for token in &tokens {
        if !rules::apply_uci(&mut pos, &token.to_lowercase()) {
            return LineCheck {
                legal: false,
                applied_plies: applied,
            };
        }
        applied += 1;
    }

    LineCheck {
        legal: true,
        applied_plies: applied,
    }
}

/// Exact-match scoring: case-insensitive, whitespace-normalized equality
/// with the known solution. No partial credit, no alternate-line analysis.
pub fn score_line(candidate: &str, solution: &str) -> bool {
    let normalized = normalize_line(candidate);
    !normalized.is_empty() && normalized == normalize_line(solution)
}
