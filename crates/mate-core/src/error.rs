//! Pipeline error types.
//!
//! Only transport failures and unusable puzzle data are errors. A model
//! producing no move, a wrong move, or an illegal move is a normal scoring
//! outcome carried in the result record, never an `Err`.

use thiserror::Error;

/// Failure talking to the completion provider.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
}
