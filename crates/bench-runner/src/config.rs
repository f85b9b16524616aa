//! Runner configuration from environment variables, resolved once at
//! startup and passed down explicitly.

use std::env;

use crate::error::RunnerError;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// API key for the completion provider.
    pub api_key: String,

    /// Base URL of the OpenAI-compatible chat API.
    pub api_base_url: String,

    /// Optional HTTP-Referer header some providers use for attribution.
    pub referer: Option<String>,

    /// Models to benchmark.
    pub models: Vec<String>,

    /// Concurrent evaluation units. Small by default: the provider is
    /// rate-limited, this workload is not CPU-bound.
    pub concurrency: usize,

    pub temperature: f32,

    /// Token budget for the first completion call per evaluation.
    pub max_tokens: u32,

    /// Ceiling for the enlarged truncation-retry budget.
    pub retry_token_ceiling: u32,

    /// Path to the local puzzle-set JSON file.
    pub puzzles_path: String,

    /// Path the result snapshot is written to.
    pub snapshot_path: String,

    pub include_board: bool,
    pub answer_tag: bool,
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self, RunnerError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| RunnerError::Config("OPENROUTER_API_KEY not set"))?;

        let models: Vec<String> = env::var("BENCH_MODELS")
            .map_err(|_| RunnerError::Config("BENCH_MODELS not set"))?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if models.is_empty() {
            return Err(RunnerError::Config("BENCH_MODELS is empty"));
        }

        Ok(Self {
            api_key,
            api_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            referer: env::var("HTTP_REFERER").ok(),
            models,
            concurrency: env::var("CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            temperature: env::var("TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            max_tokens: env::var("MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            retry_token_ceiling: env::var("RETRY_TOKEN_CEILING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16_384),
            puzzles_path: env::var("PUZZLES_PATH").unwrap_or_else(|_| "puzzles.json".to_string()),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .unwrap_or_else(|_| "snapshot.json".to_string()),
            include_board: env::var("INCLUDE_BOARD").map(|v| v != "0").unwrap_or(true),
            answer_tag: env::var("ANSWER_TAG").map(|v| v == "1").unwrap_or(false),
        })
    }
}
