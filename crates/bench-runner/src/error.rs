//! Runner error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Puzzle source error: {0}")]
    Puzzles(String),

    #[error(transparent)]
    Eval(#[from] mate_core::EvalError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
