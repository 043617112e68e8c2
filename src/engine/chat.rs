//! OpenAI-chat-compatible engine client. One HTTP call per `translate`/
//! `summarize` invocation; empty-result retries are the orchestrator's job
//! (§4.6, `SchedulerConfig::call_retries`) since only it knows how many
//! times it's worth re-asking the same engine for the same text. What this
//! module owns is transient-failure retry at the HTTP layer, grounded on
//! the teacher's `providers::retry::with_retry` (minus the circuit
//! breaker, which has no counterpart here).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Engine, EngineError, EngineOutput, TranslateKind};
use crate::config::EngineConfig;
use crate::text;

const HTTP_RETRIES: u32 = 2;
const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

pub struct ChatEngine {
    name: String,
    config: EngineConfig,
    client: Client,
}

impl ChatEngine {
    pub fn new(name: String, config: EngineConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        Self { name, config, client }
    }

    fn api_key(&self) -> Result<String, EngineError> {
        std::env::var(&self.config.api_key_env)
            .map_err(|_| EngineError::MissingApiKey(self.name.clone(), self.config.api_key_env.clone()))
    }

    fn render_prompt(&self, template: &str, target_language: &str) -> String {
        template.replace("{target_language}", target_language)
    }

    async fn call(&self, system_prompt: String, user_messages: Vec<String>) -> Result<ChatCompletion, EngineError> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let mut messages = vec![json!({ "role": "system", "content": system_prompt })];
        messages.extend(user_messages.into_iter().map(|content| json!({ "role": "user", "content": content })));

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "frequency_penalty": self.config.frequency_penalty,
            "presence_penalty": self.config.presence_penalty,
            "max_tokens": self.config.max_tokens,
        });

        let mut delay = INITIAL_BACKOFF;
        let mut last_error = None;

        for attempt in 0..=HTTP_RETRIES {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let parsed: ChatCompletion = resp
                            .json()
                            .await
                            .map_err(|e| EngineError::Malformed(self.name.clone(), e.to_string()))?;
                        return Ok(parsed);
                    }
                    if is_retryable_status(status) && attempt < HTTP_RETRIES {
                        tracing::warn!(
                            engine = %self.name,
                            status = status.as_u16(),
                            attempt,
                            "retryable status from engine, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                        continue;
                    }
                    let text = resp.text().await.unwrap_or_default();
                    return Err(EngineError::Status(self.name.clone(), status.as_u16(), text));
                }
                Err(error) => {
                    if is_retryable_transport(&error) && attempt < HTTP_RETRIES {
                        tracing::warn!(engine = %self.name, %error, attempt, "transient error, retrying");
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                        last_error = Some(error);
                        continue;
                    }
                    return Err(EngineError::Request(self.name.clone(), error));
                }
            }
        }

        Err(match last_error {
            Some(error) => EngineError::Request(self.name.clone(), error),
            None => EngineError::EmptyResult(self.name.clone(), HTTP_RETRIES + 1),
        })
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_retryable_transport(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

#[async_trait]
impl Engine for ChatEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_size(&self) -> usize {
        self.config.max_tokens as usize
    }

    fn meters_tokens(&self) -> bool {
        self.config.meters_tokens()
    }

    async fn translate(
        &self,
        input: &str,
        target_language: &str,
        source: &str,
        kind: TranslateKind,
        translate_title_ctx: Option<&str>,
    ) -> Result<EngineOutput, EngineError> {
        tracing::debug!(engine = %self.name, source, ?kind, "translate call");

        let (prompt_template, user_messages) = match kind {
            TranslateKind::Title => (&self.config.translate_prompt, vec![input.to_string()]),
            TranslateKind::Content => (
                &self.config.content_translate_prompt,
                vec![translate_title_ctx.unwrap_or_default().to_string(), input.to_string()],
            ),
        };

        let prompt = self.render_prompt(prompt_template, target_language);
        let completion = self.call(prompt, user_messages).await?;
        Ok(completion.into_output(input))
    }

    async fn summarize(
        &self,
        input: &str,
        target_language: &str,
        detail: f64,
    ) -> Result<EngineOutput, EngineError> {
        let detail_clamped = detail.clamp(0.0, 1.0);
        let base_prompt = self.render_prompt(&self.config.summary_prompt, target_language);
        let prompt = format!(
            "{base_prompt} Target roughly {}% of the original length.",
            (detail_clamped * 100.0).round()
        );
        let completion = self.call(prompt, vec![input.to_string()]).await?;
        Ok(completion.into_output(input))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize, Serialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u64,
}

impl ChatCompletion {
    /// Empty completions are returned as `EngineOutput{text: "", ...}` per
    /// §4.3 — the caller's retry loop decides what to do with them, this
    /// layer never treats an empty result as an error.
    fn into_output(self, original_input: &str) -> EngineOutput {
        let text = self
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let tokens = self
            .usage
            .map(|u| u.total_tokens)
            .unwrap_or_else(|| text::token_count(&text) as u64 + text::token_count(original_input) as u64);
        let characters = text.chars().count() as u64;

        EngineOutput { text, tokens, characters }
    }
}
