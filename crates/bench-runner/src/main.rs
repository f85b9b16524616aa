//! Mate-puzzle benchmark runner.
//!
//! Evaluates each configured model on each puzzle through a bounded worker
//! pool, then writes one result snapshot for the dashboard.

mod config;
mod error;
mod lichess;
mod openrouter;
mod puzzles;
mod snapshot;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use mate_core::{rules, EvalConfig, EvaluationResult, Evaluator, ParseMethod, PromptStyle};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::RunnerConfig;
use crate::openrouter::OpenRouterClient;

/// Parse `--fetch-puzzles id1,id2,...` from CLI args.
fn parse_fetch_puzzles() -> Option<Vec<String>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--fetch-puzzles" {
            if let Some(ids_str) = args.get(i + 1) {
                let ids: Vec<String> = ids_str
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if !ids.is_empty() {
                    return Some(ids);
                }
            }
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let _ = dotenvy::dotenv();

    // --fetch-puzzles mode: build a local puzzle set from Lichess and exit.
    if let Some(ids) = parse_fetch_puzzles() {
        let path = std::env::var("PUZZLES_PATH").unwrap_or_else(|_| "puzzles.json".to_string());
        let client = lichess::LichessClient::new();
        let mut fetched = Vec::new();
        for id in &ids {
            match client.fetch_puzzle(id).await {
                Ok(puzzle) => {
                    info!(puzzle = %id, level = ?puzzle.level, "Fetched puzzle");
                    fetched.push(puzzle);
                }
                Err(e) => warn!(puzzle = %id, "Skipping puzzle: {e}"),
            }
        }
        std::fs::write(&path, serde_json::to_string_pretty(&fetched)?)?;
        info!(count = fetched.len(), path = %path, "Puzzle set written");
        return Ok(());
    }

    let config = RunnerConfig::from_env()?;
    info!(
        models = config.models.len(),
        concurrency = config.concurrency,
        "Runner config loaded"
    );

    let puzzle_set = puzzles::load_puzzles(Path::new(&config.puzzles_path))?;
    info!(count = puzzle_set.len(), path = %config.puzzles_path, "Puzzle set loaded");

    let eval_config = EvalConfig {
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        retry_token_ceiling: config.retry_token_ceiling,
        style: PromptStyle {
            board_diagram: config.include_board,
            answer_tag: config.answer_tag,
        },
    };

    // Bounded pool: permits throttle concurrent in-flight evaluations.
    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let mut handles = Vec::new();

    for model in &config.models {
        let client = OpenRouterClient::new(
            &config.api_base_url,
            &config.api_key,
            config.referer.as_deref(),
            model,
        );
        let evaluator = Arc::new(Evaluator::new(client, eval_config.clone()));

        for puzzle in &puzzle_set {
            let semaphore = semaphore.clone();
            let evaluator = evaluator.clone();
            let puzzle = puzzle.clone();
            let model = model.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let outcome = evaluator.evaluate(&puzzle).await;

                if let Ok(result) = &outcome {
                    let first_move_san = result
                        .move_line
                        .split_whitespace()
                        .next()
                        .and_then(|m| {
                            rules::position_from_fen(&puzzle.fen)
                                .ok()
                                .map(|pos| rules::uci_to_san(&pos, m))
                        })
                        .unwrap_or_else(|| "-".to_string());
                    info!(
                        model = %model,
                        puzzle = %puzzle.id,
                        correct = result.is_correct,
                        legal = ?result.is_legal,
                        method = ?result.parse_method,
                        first_move = %first_move_san,
                        latency_ms = result.latency_ms,
                        "Evaluation finished"
                    );
                }

                (model, puzzle.id.clone(), outcome)
            }));
        }
    }

    // Aggregation happens only after every unit is done; nothing shared is
    // mutated during the concurrent phase.
    let mut results: BTreeMap<String, BTreeMap<String, EvaluationResult>> = BTreeMap::new();
    let mut failures = 0usize;
    for handle in handles {
        let (model, puzzle_id, outcome) = handle.await?;
        match outcome {
            Ok(result) => {
                results.entry(model).or_default().insert(puzzle_id, result);
            }
            Err(e) => {
                failures += 1;
                error!(model = %model, puzzle = %puzzle_id, "Evaluation failed: {e}");
            }
        }
    }

    for (model, by_puzzle) in &results {
        let correct = by_puzzle.values().filter(|r| r.is_correct).count();
        let legal_but_wrong = by_puzzle
            .values()
            .filter(|r| !r.is_correct && r.is_legal == Some(true))
            .count();
        let illegal = by_puzzle
            .values()
            .filter(|r| r.is_legal == Some(false))
            .count();
        let unparsed = by_puzzle
            .values()
            .filter(|r| r.parse_method == ParseMethod::None)
            .count();
        info!(
            model = %model,
            correct,
            legal_but_wrong,
            illegal,
            unparsed,
            total = by_puzzle.len(),
            "Model summary"
        );
    }
    if failures > 0 {
        warn!(
            failures,
            "Some evaluations failed with transport errors; their results are absent"
        );
    }

    let run_snapshot = snapshot::Snapshot {
        generated_at: chrono::Utc::now(),
        models: config.models.clone(),
        puzzle_count: puzzle_set.len(),
        results,
    };
    snapshot::write_snapshot(Path::new(&config.snapshot_path), &run_snapshot)?;
    info!(path = %config.snapshot_path, "Snapshot written");

    Ok(())
}
