//! Evaluation orchestration for one (model, puzzle) unit.
//!
//! Strictly sequential: prompt -> completion -> extraction/resolution ->
//! one optional truncation retry -> validation -> result record. Transport
//! failures propagate as errors; they are never recorded as wrong answers.

use std::future::Future;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CompletionError, EvalError};
use crate::prompt::{self, PromptStyle};
use crate::puzzle::Puzzle;
use crate::resolve::{self, ParseMethod};
use crate::validate;

/// One request to the completion collaborator.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The collaborator's reply: free text plus whatever metadata the provider
/// reports.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub latency_ms: u64,
    pub finish_reason: Option<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// The external completion collaborator (a model provider).
pub trait CompletionClient {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion, CompletionError>> + Send;
}

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub temperature: f32,
    /// Token budget for the first completion call.
    pub max_tokens: u32,
    /// Upper bound for the enlarged retry budget.
    pub retry_token_ceiling: u32,
    pub style: PromptStyle,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            temperature: 0.0,
            max_tokens: 1024,
            retry_token_ceiling: 16_384,
            style: PromptStyle::default(),
        }
    }
}

/// Output record of one evaluation. Immutable once created; the stable
/// contract with the snapshot writer and the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Space-joined UCI line, possibly empty.
    pub move_line: String,
    pub is_correct: bool,
    /// None when no candidate line was parsed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_legal: Option<bool>,
    /// Plies that replayed successfully before the first illegal one.
    pub applied_plies: usize,
    pub parse_method: ParseMethod,
    /// Retained verbatim for audit.
    pub raw_output: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

pub struct Evaluator<C> {
    client: C,
    config: EvalConfig,
}

impl<C: CompletionClient> Evaluator<C> {
    pub fn new(client: C, config: EvalConfig) -> Self {
        Evaluator { client, config }
    }

    /// Run one puzzle through the full pipeline.
    pub async fn evaluate(&self, puzzle: &Puzzle) -> Result<EvaluationResult, EvalError> {
        let need = puzzle.level.required_plies();
        let request = CompletionRequest {
            system: prompt::system_prompt(self.config.style),
            user: prompt::user_prompt(puzzle, self.config.style)?,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let started = Instant::now();
        let mut completion = self.client.complete(&request).await?;
        debug!(
            puzzle = %puzzle.id,
            latency_ms = completion.latency_ms,
            finish_reason = ?completion.finish_reason,
            "Completion received"
        );

        let mut resolved = resolve::resolve_line(&puzzle.fen, &completion.text, need);

        // Narrow retry trigger: only a fully empty parse of output that hit
        // the token budget earns one retry with a larger budget.
        if resolved.line.is_empty() && looks_truncated(&completion, request.max_tokens) {
            let retry_budget = request
                .max_tokens
                .saturating_mul(4)
                .min(self.config.retry_token_ceiling);
            warn!(
                puzzle = %puzzle.id,
                retry_budget,
                "Output truncated with nothing parsed, retrying once"
            );
            let retry_request = CompletionRequest {
                max_tokens: retry_budget,
                ..request
            };
            completion = self.client.complete(&retry_request).await?;
            resolved = resolve::resolve_line(&puzzle.fen, &completion.text, need);
        }

        let (is_legal, applied_plies, is_correct) = if resolved.line.is_empty() {
            (None, 0, false)
        } else {
            let check = validate::check_line(&puzzle.fen, &resolved.line, need);
            let correct = check.legal && validate::score_line(&resolved.line, &puzzle.solution);
            (Some(check.legal), check.applied_plies, correct)
        };

        Ok(EvaluationResult {
            move_line: resolved.line,
            is_correct,
            is_legal,
            applied_plies,
            parse_method: resolved.method,
            raw_output: completion.text,
            latency_ms: started.elapsed().as_millis() as u64,
            prompt_tokens: completion.prompt_tokens,
            completion_tokens: completion.completion_tokens,
            total_tokens: completion.total_tokens,
        })
    }
}

/// Whether the completion looks cut off at its token budget.
fn looks_truncated(completion: &Completion, budget: u32) -> bool {
    if completion.finish_reason.as_deref() == Some("length") {
        return true;
    }
    completion
        .completion_tokens
        .is_some_and(|tokens| tokens >= budget)
}
