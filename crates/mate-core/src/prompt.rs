//! Prompt construction for one puzzle evaluation.
//!
//! The original template zoo (with/without a board diagram, with/without an
//! answer tag) is collapsed into one builder parameterized by `PromptStyle`.

use shakmaty::Color;

use crate::error::EvalError;
use crate::puzzle::Puzzle;
use crate::rules;

#[derive(Debug, Clone, Copy)]
pub struct PromptStyle {
    /// Include an ASCII board diagram in the user prompt.
    pub board_diagram: bool,
    /// Ask the model to wrap its answer in [RESULT]...[/RESULT].
    pub answer_tag: bool,
}

impl Default for PromptStyle {
    fn default() -> Self {
        PromptStyle {
            board_diagram: true,
            answer_tag: false,
        }
    }
}

pub fn system_prompt(style: PromptStyle) -> String {
    let mut out = String::from(
        "You are a strong chess player solving mate puzzles. \
         Answer with the full forced line in UCI notation (for example e2e4 \
         or a7a8q), moves separated by single spaces, including the \
         opponent's forced replies. Do not add commentary.",
    );
    if style.answer_tag {
        out.push_str(" Wrap your final answer in [RESULT]...[/RESULT] tags.");
    }
    out
}

pub fn user_prompt(puzzle: &Puzzle, style: PromptStyle) -> Result<String, EvalError> {
    let pos = rules::position_from_fen(&puzzle.fen)?;
    let side = match rules::side_to_move(&pos) {
        Color::White => "White",
        Color::Black => "Black",
    };
    let plies = puzzle.level.required_plies();

    let mut out = format!(
        "Position (FEN): {}\n{} to move. Find mate in {}.\n",
        puzzle.fen,
        side,
        puzzle.level.mate_in()
    );
    if let Some(last_move) = &puzzle.last_move {
        out.push_str(&format!("The opponent just played {last_move}.\n"));
    }
    if style.board_diagram {
        out.push_str(&format!("\nBoard:\n{}\n", rules::board_diagram(&pos)));
    }
    out.push_str(&format!(
        "\nGive exactly {} {} in UCI notation.",
        plies,
        if plies == 1 { "move" } else { "moves" }
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::MoveLevel;

    fn sample_puzzle() -> Puzzle {
        Puzzle {
            id: "q-mate".into(),
            level: MoveLevel::MateIn1,
            fen: "8/p6p/1p6/3P2Q1/2P5/1q3p2/7k/5K2 w - - 4 55".into(),
            solution: "g5h4".into(),
            last_move: None,
        }
    }

    #[test]
    fn test_user_prompt_contains_fen_and_side() {
        let prompt = user_prompt(&sample_puzzle(), PromptStyle::default()).unwrap();
        assert!(prompt.contains("8/p6p/1p6/3P2Q1/2P5/1q3p2/7k/5K2 w - - 4 55"));
        assert!(prompt.contains("White to move. Find mate in 1."));
        assert!(prompt.contains("Give exactly 1 move"));
    }

    #[test]
    fn test_board_diagram_toggle() {
        let style = PromptStyle {
            board_diagram: false,
            answer_tag: false,
        };
        let prompt = user_prompt(&sample_puzzle(), style).unwrap();
        assert!(!prompt.contains("Board:"));

        let with_board = user_prompt(&sample_puzzle(), PromptStyle::default()).unwrap();
        assert!(with_board.contains("Board:"));
    }

    #[test]
    fn test_answer_tag_toggle() {
        let style = PromptStyle {
            board_diagram: true,
            answer_tag: true,
        };
        assert!(system_prompt(style).contains("[RESULT]"));
        assert!(!system_prompt(PromptStyle::default()).contains("[RESULT]"));
    }

    #[test]
    fn test_bad_fen_is_an_error() {
        let mut puzzle = sample_puzzle();
        puzzle.fen = "nonsense".into();
        assert!(user_prompt(&puzzle, PromptStyle::default()).is_err());
    }

    #[test]
    fn test_plural_moves_for_deeper_mates() {
        let mut puzzle = sample_puzzle();
        puzzle.level = MoveLevel::MateIn2;
        puzzle.solution = "unused".into();
        let prompt = user_prompt(&puzzle, PromptStyle::default()).unwrap();
        assert!(prompt.contains("mate in 2"));
        assert!(prompt.contains("Give exactly 3 moves"));
    }
}
