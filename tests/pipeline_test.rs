//! End-to-end pipeline scenarios against the real rules engine, with a
//! scripted completion client standing in for the model provider.

use mate_core::{
    Completion, CompletionClient, CompletionError, CompletionRequest, EvalConfig, EvaluationResult,
    Evaluator, MoveLevel, ParseMethod, Puzzle,
};

const QUEEN_MATE_FEN: &str = "8/p6p/1p6/3P2Q1/2P5/1q3p2/7k/5K2 w - - 4 55";

struct ScriptClient {
    text: String,
}

impl CompletionClient for ScriptClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, CompletionError> {
        Ok(Completion {
            text: self.text.clone(),
            latency_ms: 1,
            finish_reason: Some("stop".into()),
            prompt_tokens: Some(150),
            completion_tokens: Some(10),
            total_tokens: Some(160),
        })
    }
}

fn queen_mate_puzzle() -> Puzzle {
    Puzzle {
        id: "q-mate".into(),
        level: MoveLevel::MateIn1,
        fen: QUEEN_MATE_FEN.into(),
        solution: "g5h4".into(),
        last_move: None,
    }
}

async fn run(puzzle: &Puzzle, model_text: &str) -> EvaluationResult {
    let client = ScriptClient {
        text: model_text.to_string(),
    };
    let evaluator = Evaluator::new(client, EvalConfig::default());
    evaluator.evaluate(puzzle).await.unwrap()
}

#[tokio::test]
async fn chatty_uci_answer_scores_correct() {
    let result = run(&queen_mate_puzzle(), "The queen delivers mate: g5h4").await;
    assert_eq!(result.move_line, "g5h4");
    assert!(result.is_correct);
    assert_eq!(result.is_legal, Some(true));
    assert_eq!(result.parse_method, ParseMethod::Uci);
}

#[tokio::test]
async fn legal_but_wrong_move_is_scored_not_errored() {
    // g5g4 is a legal queen move from this position, just not the mate.
    let result = run(&queen_mate_puzzle(), "I'll play g5g4").await;
    assert_eq!(result.move_line, "g5g4");
    assert_eq!(result.is_legal, Some(true));
    assert!(!result.is_correct);
    assert_eq!(result.applied_plies, 1);
}

#[tokio::test]
async fn illegal_move_reports_illegal() {
    // b3b2 would move the black queen; it is white to move.
    let result = run(&queen_mate_puzzle(), "Best is b3b2").await;
    assert_eq!(result.move_line, "b3b2");
    assert_eq!(result.is_legal, Some(false));
    assert!(!result.is_correct);
    assert_eq!(result.applied_plies, 0);
}

#[tokio::test]
async fn prose_without_moves_scores_as_unparsed() {
    let result = run(&queen_mate_puzzle(), "This position is lost, I resign.").await;
    assert_eq!(result.move_line, "");
    assert!(!result.is_correct);
    assert_eq!(result.is_legal, None);
    assert_eq!(result.parse_method, ParseMethod::None);
}

#[tokio::test]
async fn san_only_answer_resolves_via_fallback() {
    let puzzle = Puzzle {
        id: "back-rank".into(),
        level: MoveLevel::MateIn1,
        fen: "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1".into(),
        solution: "e1e8".into(),
        last_move: None,
    };
    let result = run(&puzzle, "Back-rank weakness! Qe8# ends the game.").await;
    assert_eq!(result.move_line, "e1e8");
    assert!(result.is_correct);
    assert_eq!(result.parse_method, ParseMethod::San);
}

#[tokio::test]
async fn mate_in_two_full_line_scores_correct() {
    // Ladder mate: Ra7 Kg8 is forced, Rb8 mates.
    let puzzle = Puzzle {
        id: "ladder".into(),
        level: MoveLevel::MateIn2,
        fen: "7k/8/R7/8/8/8/8/1R4K1 w - - 0 1".into(),
        solution: "a6a7 h8g8 b1b8".into(),
        last_move: None,
    };
    let result = run(&puzzle, "a6a7 h8g8 b1b8").await;
    assert!(result.is_correct);
    assert_eq!(result.applied_plies, 3);
}

#[tokio::test]
async fn short_line_is_illegal_even_if_moves_were_playable() {
    let puzzle = Puzzle {
        id: "ladder".into(),
        level: MoveLevel::MateIn2,
        fen: "7k/8/R7/8/8/8/8/1R4K1 w - - 0 1".into(),
        solution: "a6a7 h8g8 b1b8".into(),
        last_move: None,
    };
    // Only two plies parse; resolution never emits a short line, so this
    // comes back unparsed rather than partially credited.
    let result = run(&puzzle, "a6a7 then h8g8").await;
    assert_eq!(result.move_line, "");
    assert!(!result.is_correct);
    assert_eq!(result.parse_method, ParseMethod::None);
}

#[tokio::test]
async fn solution_round_trips_against_itself() {
    // Sanity property: every known solution must validate and score correct
    // when fed back through the pipeline as a perfect answer.
    for (fen, solution, level) in [
        (QUEEN_MATE_FEN, "g5h4", MoveLevel::MateIn1),
        ("7k/8/R7/8/8/8/8/1R4K1 w - - 0 1", "a6a7 h8g8 b1b8", MoveLevel::MateIn2),
    ] {
        let puzzle = Puzzle {
            id: "round-trip".into(),
            level,
            fen: fen.into(),
            solution: solution.into(),
            last_move: None,
        };
        let result = run(&puzzle, solution).await;
        assert!(result.is_correct, "solution '{solution}' failed to round-trip");
        assert_eq!(result.is_legal, Some(true));
    }
}
