//! Completion client for OpenRouter's OpenAI-compatible chat API.

use std::time::{Duration, Instant};

use mate_core::{Completion, CompletionClient, CompletionError, CompletionRequest};
use reqwest::Client;
use serde_json::{json, Value};

pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    referer: Option<String>,
    model: String,
}

impl OpenRouterClient {
    pub fn new(base_url: &str, api_key: &str, referer: Option<&str>, model: &str) -> Self {
        let client = Client::builder()
            .user_agent("matebench/0.1")
            .timeout(Duration::from_secs(180))
            .build()
            .unwrap();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            referer: referer.map(str::to_string),
            model: model.to_string(),
        }
    }
}

impl CompletionClient for OpenRouterClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let started = Instant::now();
        let mut http_request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(referer) = &self.referer {
            http_request = http_request.header("HTTP-Referer", referer);
        }

        let resp = http_request
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let choice = payload["choices"]
            .get(0)
            .ok_or_else(|| CompletionError::Malformed("no choices in response".to_string()))?;

        let usage = &payload["usage"];
        Ok(Completion {
            text: extract_text(choice),
            latency_ms,
            finish_reason: choice["finish_reason"].as_str().map(str::to_string),
            prompt_tokens: usage["prompt_tokens"].as_u64().map(|n| n as u32),
            completion_tokens: usage["completion_tokens"].as_u64().map(|n| n as u32),
            total_tokens: usage["total_tokens"].as_u64().map(|n| n as u32),
        })
    }
}

/// Providers disagree on where the completion text lives. Try the known
/// envelope shapes in priority order; the raw JSON is the last resort so a
/// shape mismatch stays debuggable instead of becoming a panic.
fn extract_text(choice: &Value) -> String {
    let message = &choice["message"];

    if let Some(s) = message["content"].as_str() {
        if !s.trim().is_empty() {
            return s.to_string();
        }
    }

    if let Some(parts) = message["content"].as_array() {
        let joined: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();
        if !joined.trim().is_empty() {
            return joined;
        }
    }

    if let Some(s) = message["reasoning"].as_str() {
        if !s.trim().is_empty() {
            return s.to_string();
        }
    }

    if let Some(s) = choice["text"].as_str() {
        if !s.trim().is_empty() {
            return s.to_string();
        }
    }

    tracing::warn!("Unrecognized completion envelope, falling back to raw payload");
    choice.to_string()
}
