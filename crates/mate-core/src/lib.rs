//! Core pipeline for benchmarking language models on chess mate puzzles:
//! prompt construction, move-token extraction from free-text completions,
//! candidate-line resolution, and legality/correctness validation.

pub use shakmaty;

pub mod error;
pub mod evaluate;
pub mod extract;
pub mod prompt;
pub mod puzzle;
pub mod resolve;
pub mod rules;
pub mod validate;

pub use error::{CompletionError, EvalError};
pub use evaluate::{
    Completion, CompletionClient, CompletionRequest, EvalConfig, EvaluationResult, Evaluator,
};
pub use prompt::PromptStyle;
pub use puzzle::{MoveLevel, Puzzle};
pub use resolve::ParseMethod;
