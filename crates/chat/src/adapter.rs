use std::env;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use yatra_core::RankedMonument;

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const MAX_COMPLETION_TOKENS: u32 = 200;
const SAMPLING_TEMPERATURE: f64 = 0.7;
const CONTEXT_MONUMENTS: usize = 2;

/// One-shot bridge to the Groq chat-completions API. Every failure surfaces
/// as `Err`; the orchestrator absorbs it and falls back. No retries.
pub struct CompletionAdapter {
    client: Client,
    api_key: String,
    model: String,
}

impl CompletionAdapter {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    /// None when no credential is configured; the caller then serves every
    /// reply from the rule engine.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("YATRA_GROQ_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        let model = env::var("YATRA_GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Some(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, message: &str, nearby: &[RankedMonument]) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt(nearby) },
                { "role": "user", "content": message }
            ],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": SAMPLING_TEMPERATURE
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .context("completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("completion non-success status {}: {}", status.as_u16(), body);
        }

        let body: Value = response.json().await.context("completion parse failed")?;
        extract_completion_text(&body)
            .filter(|value| !value.trim().is_empty())
            .context("completion content missing")
    }
}

fn system_prompt(nearby: &[RankedMonument]) -> String {
    let context = if nearby.is_empty() {
        "\nNo monuments nearby.".to_string()
    } else {
        nearby
            .iter()
            .take(CONTEXT_MONUMENTS)
            .map(|ranked| {
                format!(
                    "\n- {} ({:.1} km away): {}",
                    ranked.monument.name, ranked.distance_km, ranked.monument.description
                )
            })
            .collect::<String>()
    };

    format!(
        "You are a friendly, knowledgeable AI tour guide for Delhi, India. A tourist is standing right in front of a monument and talking to you.\n\n\
Context - Nearby monuments:{context}\n\n\
Constraints: Reply in under 80 words. Speak naturally as if face-to-face. Use present tense. If you don't know something, say so - do not make up facts. If the tourist asks about pricing or safety, use only the data you have been given."
    )
}

fn extract_completion_text(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}
